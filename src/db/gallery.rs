// Postgres-backed gallery repository (images + videos)

use super::queries::{
    media_order_clause, CLEAR_ALL_FEATURED, CLEAR_FEATURED_EXCEPT, IMAGE_COLUMNS, INSERT_IMAGE,
    INSERT_VIDEO, SET_FEATURED, VIDEO_COLUMNS,
};
use crate::error::AppError;
use crate::models::{GalleryImage, GalleryVideo, MediaOrder, NewImage, NewVideo};
use crate::store::GalleryRepository;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracing::{debug, info};
use uuid::Uuid;

pub struct PgGalleryRepository {
    pool: Pool,
}

impl PgGalleryRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn image_from_row(row: &Row) -> GalleryImage {
    GalleryImage {
        id: row.get("id"),
        image_url: row.get("image_url"),
        event_type: row.get("event_type"),
        caption: row.get("caption"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
    }
}

fn video_from_row(row: &Row) -> GalleryVideo {
    GalleryVideo {
        id: row.get("id"),
        video_url: row.get("video_url"),
        thumbnail_url: row.get("thumbnail_url"),
        title: row.get("title"),
        event_type: row.get("event_type"),
        is_featured: row.get("is_featured"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl GalleryRepository for PgGalleryRepository {
    async fn list_images(&self, order: MediaOrder) -> Result<Vec<GalleryImage>, AppError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM gallery_images {}",
            IMAGE_COLUMNS,
            media_order_clause(order)
        );
        let rows = client.query(&sql, &[]).await?;
        Ok(rows.iter().map(image_from_row).collect())
    }

    async fn get_image(&self, id: Uuid) -> Result<Option<GalleryImage>, AppError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM gallery_images WHERE id = $1", IMAGE_COLUMNS);
        let row = client.query_opt(&sql, &[&id]).await?;
        Ok(row.as_ref().map(image_from_row))
    }

    async fn insert_image(&self, new: NewImage) -> Result<GalleryImage, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(INSERT_IMAGE, &[&new.image_url, &new.event_type, &new.caption])
            .await?;
        Ok(image_from_row(&row))
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM gallery_images WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }

    async fn list_videos(&self, order: MediaOrder) -> Result<Vec<GalleryVideo>, AppError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM gallery_videos {}",
            VIDEO_COLUMNS,
            media_order_clause(order)
        );
        let rows = client.query(&sql, &[]).await?;
        Ok(rows.iter().map(video_from_row).collect())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<GalleryVideo>, AppError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM gallery_videos WHERE id = $1", VIDEO_COLUMNS);
        let row = client.query_opt(&sql, &[&id]).await?;
        Ok(row.as_ref().map(video_from_row))
    }

    async fn featured_video(&self) -> Result<Option<GalleryVideo>, AppError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM gallery_videos WHERE is_featured LIMIT 1",
            VIDEO_COLUMNS
        );
        let row = client.query_opt(&sql, &[]).await?;
        Ok(row.as_ref().map(video_from_row))
    }

    async fn insert_video(&self, new: NewVideo) -> Result<GalleryVideo, AppError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        if new.is_featured {
            let cleared = tx.execute(CLEAR_ALL_FEATURED, &[]).await?;
            debug!("Cleared featured flag on {} video(s)", cleared);
        }

        let params: [&(dyn ToSql + Sync); 5] = [
            &new.video_url,
            &new.thumbnail_url,
            &new.title,
            &new.event_type,
            &new.is_featured,
        ];
        let row = tx.query_one(INSERT_VIDEO, &params).await?;
        tx.commit().await?;

        Ok(video_from_row(&row))
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM gallery_videos WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }

    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<Option<GalleryVideo>, AppError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        if featured {
            tx.execute(CLEAR_FEATURED_EXCEPT, &[&id]).await?;
        }

        let row = tx.query_opt(SET_FEATURED, &[&id, &featured]).await?;
        match row {
            Some(row) => {
                tx.commit().await?;
                info!("Video {} featured={}", id, featured);
                Ok(Some(video_from_row(&row)))
            }
            // Unknown id: dropping the transaction rolls the clear back
            None => Ok(None),
        }
    }
}
