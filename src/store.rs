//! Repository seams
//!
//! Handlers and services talk to these traits; `db` provides the Postgres
//! implementations used in production.

#[cfg(test)]
pub mod memory;

use crate::error::AppError;
use crate::models::{
    GalleryImage, GalleryVideo, Inquiry, InquiryStatus, MediaOrder, NewImage, NewInquiry, NewVideo,
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Insert with status `new`
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, AppError>;

    /// All inquiries, newest first
    async fn list(&self) -> Result<Vec<Inquiry>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Inquiry>, AppError>;

    /// Single-row status update. `None` when the id is unknown.
    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> Result<Option<Inquiry>, AppError>;
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn list_images(&self, order: MediaOrder) -> Result<Vec<GalleryImage>, AppError>;

    async fn get_image(&self, id: Uuid) -> Result<Option<GalleryImage>, AppError>;

    async fn insert_image(&self, image: NewImage) -> Result<GalleryImage, AppError>;

    /// Returns whether a row was deleted
    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_videos(&self, order: MediaOrder) -> Result<Vec<GalleryVideo>, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<GalleryVideo>, AppError>;

    async fn featured_video(&self) -> Result<Option<GalleryVideo>, AppError>;

    /// Inserts atomically; a featured insert clears every other featured row first
    async fn insert_video(&self, video: NewVideo) -> Result<GalleryVideo, AppError>;

    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError>;

    /// Atomically sets or clears the flag. Setting it clears every other row.
    /// `None` when the id is unknown (nothing changes).
    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<Option<GalleryVideo>, AppError>;
}
