//! In-memory test doubles for the repository, storage and verification seams

use super::{GalleryRepository, InquiryRepository};
use crate::captcha::CaptchaVerifier;
use crate::error::AppError;
use crate::models::{
    GalleryImage, GalleryVideo, Inquiry, InquiryStatus, MediaOrder, NewImage, NewInquiry, NewVideo,
};
use crate::storage::ObjectStore;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Monotonic timestamps so "newest first" is deterministic within a test
#[derive(Default)]
struct Clock(AtomicI64);

impl Clock {
    fn tick(&self) -> chrono::DateTime<Utc> {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        Utc::now() + Duration::milliseconds(n)
    }
}

#[derive(Default)]
pub struct MemoryInquiries {
    rows: RwLock<Vec<Inquiry>>,
    clock: Clock,
    pub fail_writes: AtomicBool,
}

impl MemoryInquiries {
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl InquiryRepository for MemoryInquiries {
    async fn insert(&self, new: NewInquiry) -> Result<Inquiry, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("insert rejected".into()));
        }
        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            created_at: self.clock.tick(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            event_type: new.event_type.to_string(),
            event_type_other: new.event_type_other,
            event_date: new.event_date,
            guest_count: new.guest_count,
            hear_about_us: new.hear_about_us.to_string(),
            hear_about_us_other: new.hear_about_us_other,
            message: new.message,
            status: InquiryStatus::New,
        };
        self.rows.write().await.push(inquiry.clone());
        Ok(inquiry)
    }

    async fn list(&self) -> Result<Vec<Inquiry>, AppError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Inquiry>, AppError> {
        Ok(self.rows.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> Result<Option<Inquiry>, AppError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|i| i.id == id).map(|row| {
            row.status = status;
            row.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryGallery {
    images: RwLock<Vec<GalleryImage>>,
    videos: RwLock<Vec<GalleryVideo>>,
    clock: Clock,
    pub fail_inserts: AtomicBool,
}

impl MemoryGallery {
    /// Seeds a video row directly, bypassing the featured invariant
    pub async fn seed_video(&self, is_featured: bool) -> GalleryVideo {
        let video = GalleryVideo {
            id: Uuid::new_v4(),
            video_url: format!("https://storage.test/videos/{}.mp4", Uuid::new_v4()),
            thumbnail_url: None,
            title: None,
            event_type: None,
            is_featured,
            display_order: 0,
            created_at: self.clock.tick(),
        };
        self.videos.write().await.push(video.clone());
        video
    }

    pub async fn featured_count(&self) -> usize {
        self.videos.read().await.iter().filter(|v| v.is_featured).count()
    }
}

fn sort_media<T, F>(rows: &mut [T], order: MediaOrder, key: F)
where
    F: Fn(&T) -> (i32, chrono::DateTime<Utc>),
{
    match order {
        MediaOrder::Display => rows.sort_by_key(|r| key(r)),
        MediaOrder::Newest => rows.sort_by(|a, b| key(b).1.cmp(&key(a).1)),
    }
}

#[async_trait]
impl GalleryRepository for MemoryGallery {
    async fn list_images(&self, order: MediaOrder) -> Result<Vec<GalleryImage>, AppError> {
        let mut rows = self.images.read().await.clone();
        sort_media(&mut rows, order, |r| (r.display_order, r.created_at));
        Ok(rows)
    }

    async fn get_image(&self, id: Uuid) -> Result<Option<GalleryImage>, AppError> {
        Ok(self.images.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_image(&self, new: NewImage) -> Result<GalleryImage, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("insert rejected".into()));
        }
        let image = GalleryImage {
            id: Uuid::new_v4(),
            image_url: new.image_url,
            event_type: new.event_type,
            caption: new.caption,
            display_order: 0,
            created_at: self.clock.tick(),
        };
        self.images.write().await.push(image.clone());
        Ok(image)
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.images.write().await;
        let before = rows.len();
        rows.retain(|i| i.id != id);
        Ok(rows.len() != before)
    }

    async fn list_videos(&self, order: MediaOrder) -> Result<Vec<GalleryVideo>, AppError> {
        let mut rows = self.videos.read().await.clone();
        sort_media(&mut rows, order, |r| (r.display_order, r.created_at));
        Ok(rows)
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<GalleryVideo>, AppError> {
        Ok(self.videos.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn featured_video(&self) -> Result<Option<GalleryVideo>, AppError> {
        Ok(self.videos.read().await.iter().find(|v| v.is_featured).cloned())
    }

    async fn insert_video(&self, new: NewVideo) -> Result<GalleryVideo, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("insert rejected".into()));
        }
        // Single write lock stands in for the database transaction
        let mut rows = self.videos.write().await;
        if new.is_featured {
            rows.iter_mut().for_each(|v| v.is_featured = false);
        }
        let video = GalleryVideo {
            id: Uuid::new_v4(),
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            title: new.title,
            event_type: new.event_type,
            is_featured: new.is_featured,
            display_order: 0,
            created_at: self.clock.tick(),
        };
        rows.push(video.clone());
        Ok(video)
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.videos.write().await;
        let before = rows.len();
        rows.retain(|v| v.id != id);
        Ok(rows.len() != before)
    }

    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<Option<GalleryVideo>, AppError> {
        let mut rows = self.videos.write().await;
        if !rows.iter().any(|v| v.id == id) {
            return Ok(None);
        }
        for row in rows.iter_mut() {
            if row.id == id {
                row.is_featured = featured;
            } else if featured {
                row.is_featured = false;
            }
        }
        Ok(rows.iter().find(|v| v.id == id).cloned())
    }
}

/// Bucket stand-in; public URLs use the same layout as the real storage API
#[derive(Default)]
pub struct MemoryObjects {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    pub fail_uploads: AtomicBool,
    pub fail_removes: AtomicBool,
}

impl MemoryObjects {
    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    pub async fn count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjects {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Bucket not found".into()));
        }
        let mut objects = self.objects.write().await;
        if objects.contains_key(path) {
            return Err(AppError::Storage("The resource already exists".into()));
        }
        objects.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> Result<(), AppError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("remove rejected".into()));
        }
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.test/storage/v1/object/public/gallery/{}", path)
    }

    fn bucket(&self) -> &str {
        "gallery"
    }
}

/// Accepts exactly the token `"valid"`; `"unreachable"` simulates a transport failure
#[derive(Default)]
pub struct StaticCaptcha {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CaptchaVerifier for StaticCaptcha {
    async fn verify(&self, token: &str, _remote_ip: Option<&str>) -> Result<bool, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match token {
            "unreachable" => Err(AppError::Upstream("connection refused".into())),
            t => Ok(t == "valid"),
        }
    }
}
