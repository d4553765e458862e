//! Gallery media workflow
//!
//! Every mutation pairs an object in the storage bucket with a row in the
//! database. Uploads store the file first and insert the row second; if the
//! insert fails the uploaded objects are removed again. Deletes remove the
//! objects first and the row second; a failure part-way is reported, not
//! reconciled.

use crate::cache::{PageCache, GALLERY_IMAGES_TAG, GALLERY_VIDEOS_TAG};
use crate::error::{not_found_error, validation_error, AppError};
use crate::models::{GalleryImage, GalleryVideo, NewImage, NewVideo};
use crate::storage::ObjectStore;
use crate::store::GalleryRepository;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

const VIDEO_PREFIX: &str = "videos";
const THUMBNAIL_PREFIX: &str = "thumbnails";

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lower-cased extension, if it is one of `allowed`
    fn extension(&self, allowed: &[&str]) -> Result<String, AppError> {
        if self.bytes.is_empty() {
            return Err(validation_error("Please select a file"));
        }
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if allowed.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(validation_error(format!(
                "Unsupported file type. Allowed: {}",
                allowed.join(", ")
            )))
        }
    }

    fn mime(&self, ext: &str) -> String {
        if let Some(ct) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return ct.to_string();
        }
        match ext {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "mp4" => "video/mp4",
            "mov" => "video/quicktime",
            "webm" => "video/webm",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file: UploadedFile,
    pub event_type: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub file: UploadedFile,
    pub thumbnail: Option<UploadedFile>,
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub is_featured: bool,
}

/// `<unix millis>-<6 random alphanumerics>.<ext>`
pub fn object_name(ext: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_ascii_lowercase();
    format!("{}-{}.{}", chrono::Utc::now().timestamp_millis(), suffix, ext)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct MediaLibrary {
    gallery: Arc<dyn GalleryRepository>,
    storage: Arc<dyn ObjectStore>,
    cache: PageCache,
}

impl MediaLibrary {
    pub fn new(
        gallery: Arc<dyn GalleryRepository>,
        storage: Arc<dyn ObjectStore>,
        cache: PageCache,
    ) -> Self {
        Self { gallery, storage, cache }
    }

    async fn store(&self, path: String, file: UploadedFile, ext: &str) -> Result<String, AppError> {
        let mime = file.mime(ext);
        self.storage.upload(&path, file.bytes, &mime).await?;
        Ok(path)
    }

    /// Best-effort removal after a failed insert
    async fn discard(&self, paths: &[String]) {
        if let Err(e) = self.storage.remove(paths).await {
            error!("Failed to clean up orphaned objects {:?}: {}", paths, e);
        }
    }

    fn paths_for(&self, urls: &[Option<&str>]) -> Vec<String> {
        urls.iter()
            .flatten()
            .filter_map(|url| {
                let path = self.storage.path_from_public_url(url);
                if path.is_none() {
                    warn!("Cannot derive storage path from {}", url);
                }
                path
            })
            .collect()
    }

    pub async fn upload_image(&self, upload: ImageUpload) -> Result<GalleryImage, AppError> {
        let ext = upload.file.extension(IMAGE_EXTENSIONS)?;
        let event_type = blank_to_none(Some(upload.event_type))
            .ok_or_else(|| validation_error("Event type is required"))?;

        let path = self.store(object_name(&ext), upload.file, &ext).await?;
        let new = NewImage {
            image_url: self.storage.public_url(&path),
            event_type,
            caption: blank_to_none(upload.caption),
        };

        let image = match self.gallery.insert_image(new).await {
            Ok(image) => image,
            Err(e) => {
                self.discard(&[path]).await;
                return Err(e);
            }
        };

        self.cache.invalidate_tag(GALLERY_IMAGES_TAG).await;
        info!("🖼️  Uploaded gallery image {}", image.id);
        Ok(image)
    }

    pub async fn upload_video(&self, upload: VideoUpload) -> Result<GalleryVideo, AppError> {
        let ext = upload.file.extension(VIDEO_EXTENSIONS)?;
        let thumbnail = match upload.thumbnail {
            Some(thumb) if !thumb.bytes.is_empty() => {
                let thumb_ext = thumb.extension(IMAGE_EXTENSIONS)?;
                Some((thumb, thumb_ext))
            }
            _ => None,
        };

        let mut stored = Vec::new();
        let video_path = self
            .store(format!("{}/{}", VIDEO_PREFIX, object_name(&ext)), upload.file, &ext)
            .await?;
        stored.push(video_path.clone());

        let thumbnail_url = match thumbnail {
            Some((thumb, thumb_ext)) => {
                let name = format!("{}/{}", THUMBNAIL_PREFIX, object_name(&thumb_ext));
                match self.store(name, thumb, &thumb_ext).await {
                    Ok(path) => {
                        stored.push(path.clone());
                        Some(self.storage.public_url(&path))
                    }
                    Err(e) => {
                        self.discard(&stored).await;
                        return Err(e);
                    }
                }
            }
            None => None,
        };

        let new = NewVideo {
            video_url: self.storage.public_url(&video_path),
            thumbnail_url,
            title: blank_to_none(upload.title),
            event_type: blank_to_none(upload.event_type),
            is_featured: upload.is_featured,
        };

        let video = match self.gallery.insert_video(new).await {
            Ok(video) => video,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e);
            }
        };

        self.cache.invalidate_tag(GALLERY_VIDEOS_TAG).await;
        info!("🎬 Uploaded gallery video {} (featured: {})", video.id, video.is_featured);
        Ok(video)
    }

    pub async fn delete_image(&self, id: Uuid) -> Result<(), AppError> {
        let image = self
            .gallery
            .get_image(id)
            .await?
            .ok_or_else(|| not_found_error(format!("Image {} not found", id)))?;

        let paths = self.paths_for(&[Some(image.image_url.as_str())]);
        self.storage.remove(&paths).await?;

        if !self.gallery.delete_image(id).await? {
            return Err(not_found_error(format!("Image {} not found", id)));
        }

        self.cache.invalidate_tag(GALLERY_IMAGES_TAG).await;
        info!("🗑️  Deleted gallery image {}", id);
        Ok(())
    }

    pub async fn delete_video(&self, id: Uuid) -> Result<(), AppError> {
        let video = self
            .gallery
            .get_video(id)
            .await?
            .ok_or_else(|| not_found_error(format!("Video {} not found", id)))?;

        let paths = self.paths_for(&[Some(video.video_url.as_str()), video.thumbnail_url.as_deref()]);
        self.storage.remove(&paths).await?;

        if !self.gallery.delete_video(id).await? {
            return Err(not_found_error(format!("Video {} not found", id)));
        }

        self.cache.invalidate_tag(GALLERY_VIDEOS_TAG).await;
        info!("🗑️  Deleted gallery video {}", id);
        Ok(())
    }

    /// Feature (or unfeature) one video; featuring clears every other row
    pub async fn set_featured(&self, id: Uuid, featured: bool) -> Result<GalleryVideo, AppError> {
        let video = self
            .gallery
            .set_featured(id, featured)
            .await?
            .ok_or_else(|| not_found_error(format!("Video {} not found", id)))?;

        self.cache.invalidate_tag(GALLERY_VIDEOS_TAG).await;
        info!("⭐ Video {} featured: {}", id, featured);
        Ok(video)
    }
}
