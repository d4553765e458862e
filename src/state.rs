//! Application state management
//!
//! Contains shared state accessible across all handlers. External systems are
//! held behind their traits so the router can run against in-memory stand-ins.

use crate::cache::PageCache;
use crate::captcha::CaptchaVerifier;
use crate::config::{AdminConfig, Settings};
use crate::content::ContentClient;
use crate::inquiry::InquiryService;
use crate::media::MediaLibrary;
use crate::storage::ObjectStore;
use crate::store::{GalleryRepository, InquiryRepository};
use std::sync::Arc;

/// The external collaborators a running site talks to
pub struct Backends {
    pub inquiries: Arc<dyn InquiryRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub storage: Arc<dyn ObjectStore>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub content: ContentClient,
}

/// Application state shared across all handlers
pub struct AppState {
    /// Inquiry rows (admin viewer)
    pub inquiries: Arc<dyn InquiryRepository>,

    /// CAPTCHA-gated submission pipeline
    pub submissions: InquiryService,

    /// Gallery rows (page reads)
    pub gallery: Arc<dyn GalleryRepository>,

    /// Gallery mutations (paired storage + row changes)
    pub media: MediaLibrary,

    pub content: ContentClient,

    /// Rendered public pages
    pub cache: PageCache,

    pub admin: AdminConfig,

    /// Shared secret for the content webhook
    pub webhook_secret: String,

    /// Public key rendered into the CAPTCHA widget
    pub turnstile_site_key: String,
}

impl AppState {
    pub fn new(backends: Backends, settings: &Settings) -> Self {
        let cache = PageCache::new(settings.cache.revalidate_after());
        let submissions = InquiryService::new(backends.captcha, backends.inquiries.clone());
        let media = MediaLibrary::new(backends.gallery.clone(), backends.storage, cache.clone());

        Self {
            inquiries: backends.inquiries,
            submissions,
            gallery: backends.gallery,
            media,
            content: backends.content,
            cache,
            admin: settings.admin.clone(),
            webhook_secret: settings.cache.webhook_secret.clone(),
            turnstile_site_key: settings.captcha.site_key.clone(),
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
