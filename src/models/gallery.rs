//! Gallery media models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A gallery image row. The file behind `image_url` lives in object storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub image_url: String,
    pub event_type: String,
    pub caption: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A gallery video row. At most one row is featured at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryVideo {
    pub id: Uuid,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewImage {
    pub image_url: String,
    pub event_type: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub is_featured: bool,
}

/// Row ordering for gallery listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOrder {
    /// Public pages: `display_order` ascending, oldest first within a slot
    Display,
    /// Admin dashboard: most recent upload first
    Newest,
}

/// Label list shown above the gallery: "All" plus each distinct event type in first-seen order
pub fn distinct_event_types(images: &[GalleryImage]) -> Vec<String> {
    let mut labels = vec!["All".to_string()];
    for image in images {
        if !labels.iter().skip(1).any(|l| l == &image.event_type) {
            labels.push(image.event_type.clone());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(event_type: &str) -> GalleryImage {
        GalleryImage {
            id: Uuid::new_v4(),
            image_url: "https://cdn.example.com/a.jpg".into(),
            event_type: event_type.into(),
            caption: None,
            display_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_distinct_event_types_keeps_first_seen_order() {
        let images = vec![image("Wedding"), image("Birthday"), image("Wedding"), image("Proposal")];
        assert_eq!(
            distinct_event_types(&images),
            vec!["All", "Wedding", "Birthday", "Proposal"]
        );
    }

    #[test]
    fn test_distinct_event_types_empty() {
        assert_eq!(distinct_event_types(&[]), vec!["All"]);
    }
}
