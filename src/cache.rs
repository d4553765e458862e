//! Rendered page cache
//!
//! Pages are re-rendered at most once per revalidation interval. Each entry is
//! tagged with the content types it was built from so a webhook (or an admin
//! media change) can drop exactly the affected pages.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Tags for media tables, alongside the CMS document types
pub const GALLERY_IMAGES_TAG: &str = "gallery_images";
pub const GALLERY_VIDEOS_TAG: &str = "gallery_videos";

#[derive(Debug, Clone)]
struct CachedPage {
    html: String,
    tags: Vec<String>,
    rendered_at: Instant,
}

#[derive(Debug, Default)]
struct Entries {
    pages: HashMap<String, CachedPage>,
    /// Epoch at which each tag was last invalidated
    invalidated: HashMap<String, u64>,
    epoch: u64,
}

#[derive(Clone)]
pub struct PageCache {
    entries: Arc<RwLock<Entries>>,
    revalidate_after: Duration,
}

impl PageCache {
    pub fn new(revalidate_after: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            revalidate_after,
        }
    }

    /// Fresh HTML for `key`, if any
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .pages
            .get(key)
            .filter(|page| page.rendered_at.elapsed() < self.revalidate_after)
            .map(|page| page.html.clone())
    }

    /// Current invalidation epoch; take it before loading the data a page is rendered from
    pub async fn epoch(&self) -> u64 {
        self.entries.read().await.epoch
    }

    /// Store a page rendered from data loaded at `epoch`. A page whose tags were
    /// invalidated after that point is stale and is not stored.
    pub async fn put(&self, key: &str, tags: &[&str], html: String, epoch: u64) -> bool {
        let mut entries = self.entries.write().await;
        let stale = tags.iter().any(|tag| {
            entries
                .invalidated
                .get(*tag)
                .is_some_and(|invalidated| *invalidated > epoch)
        });
        if stale {
            debug!("Discarding {} rendered before a newer invalidation", key);
            return false;
        }

        let page = CachedPage {
            html,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rendered_at: Instant::now(),
        };
        entries.pages.insert(key.to_string(), page);
        true
    }

    /// Drop every page built from `tag`. Returns how many were dropped.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.entries.write().await;
        entries.epoch += 1;
        let epoch = entries.epoch;
        entries.invalidated.insert(tag.to_string(), epoch);

        let before = entries.pages.len();
        entries.pages.retain(|_, page| !page.tags.iter().any(|t| t == tag));
        let dropped = before - entries.pages.len();
        debug!("Invalidated {} cached page(s) tagged {}", dropped, tag);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.put("/", &["homePage", "service"], "<p>home</p>".into(), 0).await;
        assert_eq!(cache.get("/").await.as_deref(), Some("<p>home</p>"));
        assert!(cache.get("/about").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_entries_are_not_served() {
        let cache = PageCache::new(Duration::ZERO);
        cache.put("/", &["homePage"], "old".into(), 0).await;
        assert!(cache.get("/").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_by_tag() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.put("/", &["homePage", "siteSettings"], "home".into(), 0).await;
        cache.put("/about", &["aboutPage", "siteSettings"], "about".into(), 0).await;
        cache.put("/gallery", &["galleryPage", GALLERY_IMAGES_TAG], "gallery".into(), 0).await;

        assert_eq!(cache.invalidate_tag("aboutPage").await, 1);
        assert!(cache.get("/about").await.is_none());
        assert!(cache.get("/").await.is_some());

        assert_eq!(cache.invalidate_tag("siteSettings").await, 1);
        assert_eq!(cache.invalidate_tag(GALLERY_IMAGES_TAG).await, 1);
        assert_eq!(cache.invalidate_tag("unknown").await, 0);
    }

    #[tokio::test]
    async fn test_render_overtaken_by_invalidation_is_discarded() {
        let cache = PageCache::new(Duration::from_secs(60));
        let epoch = cache.epoch().await;

        cache.invalidate_tag("aboutPage").await;
        assert!(!cache.put("/about", &["aboutPage", "siteSettings"], "stale".into(), epoch).await);
        assert!(cache.get("/about").await.is_none());

        assert!(cache.put("/", &["homePage"], "home".into(), epoch).await);

        let epoch = cache.epoch().await;
        assert!(cache.put("/about", &["aboutPage"], "fresh".into(), epoch).await);
        assert_eq!(cache.get("/about").await.as_deref(), Some("fresh"));
    }
}
