//! SQL query constants
//!
//! Contains all SQL used by the Postgres repositories.

/// Idempotent schema bootstrap, executed in order at startup
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS inquiries (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        event_type TEXT NOT NULL,
        event_type_other TEXT,
        event_date DATE,
        guest_count INTEGER,
        hear_about_us TEXT NOT NULL,
        hear_about_us_other TEXT,
        message TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'new'
            CHECK (status IN ('new', 'contacted', 'booked', 'archived'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gallery_images (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        image_url TEXT NOT NULL,
        event_type TEXT NOT NULL,
        caption TEXT,
        display_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gallery_videos (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        video_url TEXT NOT NULL,
        thumbnail_url TEXT,
        title TEXT,
        event_type TEXT,
        is_featured BOOLEAN NOT NULL DEFAULT false,
        display_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_inquiries_created_at ON inquiries (created_at DESC)",
    // At most one featured video, enforced by the database itself
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_gallery_videos_single_featured ON gallery_videos (is_featured) WHERE is_featured",
];

pub const INQUIRY_COLUMNS: &str = "id, created_at, name, email, phone, event_type, event_type_other, \
     event_date, guest_count, hear_about_us, hear_about_us_other, message, status";

pub const INSERT_INQUIRY: &str = r#"
    INSERT INTO inquiries
        (name, email, phone, event_type, event_type_other, event_date, guest_count,
         hear_about_us, hear_about_us_other, message, status)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'new')
    RETURNING id, created_at, name, email, phone, event_type, event_type_other,
        event_date, guest_count, hear_about_us, hear_about_us_other, message, status
"#;

pub const UPDATE_INQUIRY_STATUS: &str = r#"
    UPDATE inquiries SET status = $2 WHERE id = $1
    RETURNING id, created_at, name, email, phone, event_type, event_type_other,
        event_date, guest_count, hear_about_us, hear_about_us_other, message, status
"#;

pub const IMAGE_COLUMNS: &str = "id, image_url, event_type, caption, display_order, created_at";

pub const INSERT_IMAGE: &str = r#"
    INSERT INTO gallery_images (image_url, event_type, caption)
    VALUES ($1, $2, $3)
    RETURNING id, image_url, event_type, caption, display_order, created_at
"#;

pub const VIDEO_COLUMNS: &str =
    "id, video_url, thumbnail_url, title, event_type, is_featured, display_order, created_at";

pub const INSERT_VIDEO: &str = r#"
    INSERT INTO gallery_videos (video_url, thumbnail_url, title, event_type, is_featured)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, video_url, thumbnail_url, title, event_type, is_featured, display_order, created_at
"#;

pub const CLEAR_FEATURED_EXCEPT: &str =
    "UPDATE gallery_videos SET is_featured = false WHERE is_featured AND id <> $1";

pub const CLEAR_ALL_FEATURED: &str = "UPDATE gallery_videos SET is_featured = false WHERE is_featured";

pub const SET_FEATURED: &str = r#"
    UPDATE gallery_videos SET is_featured = $2 WHERE id = $1
    RETURNING id, video_url, thumbnail_url, title, event_type, is_featured, display_order, created_at
"#;

/// ORDER BY clause for a media listing
pub fn media_order_clause(order: crate::models::MediaOrder) -> &'static str {
    match order {
        crate::models::MediaOrder::Display => "ORDER BY display_order ASC, created_at ASC",
        crate::models::MediaOrder::Newest => "ORDER BY created_at DESC",
    }
}
