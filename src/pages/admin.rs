//! Admin pages: login, gallery dashboard, inquiries

use super::{admin_layout, banner, COMPANY_NAME};
use crate::media::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::models::{EventType, GalleryImage, GalleryVideo, Inquiry, InquiryStatus};
use maud::{html, Markup};

/// Flash message carried across a post-redirect-get
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    Success(&'a str),
    Error(&'a str),
}

fn notice_banner(notice: Option<Notice<'_>>) -> Markup {
    match notice {
        Some(Notice::Success(msg)) => banner("success", msg),
        Some(Notice::Error(msg)) => banner("error", msg),
        None => html! {},
    }
}

fn accept(extensions: &[&str]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

fn header(current: &str) -> Markup {
    html! {
        header.site-nav {
            h1 { (COMPANY_NAME) " Admin" }
            ul {
                li class=[(current == "gallery").then_some("current")] {
                    a href="/admin/dashboard" { "Gallery" }
                }
                li class=[(current == "inquiries").then_some("current")] {
                    a href="/admin/inquiries" { "Inquiries" }
                }
                li {
                    form method="post" action="/admin/logout" {
                        button.button type="submit" { "Logout" }
                    }
                }
            }
        }
    }
}

pub fn login(error: Option<&str>, email: &str) -> Markup {
    admin_layout(
        "Login",
        html! {
            section {
                h1 { "Admin Login" }
                @if let Some(error) = error {
                    (banner("error", error))
                }
                form.stacked method="post" action="/admin/login" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" required value=(email);
                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;
                    p { button.button type="submit" { "Sign In" } }
                }
            }
        },
    )
}

fn event_type_select(id: &str, required: bool) -> Markup {
    html! {
        select id=(id) name="event_type" required[required] {
            option value="" { "Select type" }
            @for event_type in EventType::ALL {
                option value=(event_type.as_str()) { (event_type.as_str()) }
            }
        }
    }
}

pub fn dashboard(
    images: &[GalleryImage],
    videos: &[GalleryVideo],
    notice: Option<Notice<'_>>,
) -> Markup {
    admin_layout(
        "Gallery",
        html! {
            (header("gallery"))
            (notice_banner(notice))

            section {
                h2 { "Upload New Image" }
                form.stacked method="post" action="/admin/gallery/images" enctype="multipart/form-data" {
                    label for="image-file" { "Image" }
                    input type="file" id="image-file" name="file" accept=(accept(IMAGE_EXTENSIONS)) required;
                    label for="event_type" { "Event Type" }
                    (event_type_select("event_type", true))
                    label for="caption" { "Caption" }
                    input type="text" id="caption" name="caption" placeholder="Optional caption";
                    p { button.button type="submit" { "Upload Image" } }
                }
            }

            section {
                h2 { "Gallery Images (" (images.len()) ")" }
                @if images.is_empty() {
                    p { "No images yet. Upload your first image above." }
                } @else {
                    div.grid.gallery {
                        @for image in images {
                            figure.card {
                                img src=(image.image_url) alt=(image.caption.as_deref().unwrap_or(&image.event_type)) loading="lazy";
                                figcaption {
                                    strong { (image.event_type) }
                                    @if let Some(caption) = &image.caption {
                                        p { (caption) }
                                    }
                                }
                                form method="post" action={ "/admin/gallery/images/" (image.id.to_string()) "/delete" }
                                    onsubmit="return confirm('Are you sure you want to delete this image?')" {
                                    button.button.danger type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }

            section {
                h2 { "Upload New Video" }
                form.stacked method="post" action="/admin/gallery/videos" enctype="multipart/form-data" {
                    label for="video-file" { "Video" }
                    input type="file" id="video-file" name="file" accept=(accept(VIDEO_EXTENSIONS)) required;
                    label for="thumbnail" { "Thumbnail" }
                    input type="file" id="thumbnail" name="thumbnail" accept=(accept(IMAGE_EXTENSIONS));
                    label for="title" { "Title" }
                    input type="text" id="title" name="title" placeholder="Optional title";
                    label for="video_event_type" { "Event Type" }
                    (event_type_select("video_event_type", false))
                    label {
                        input type="checkbox" name="is_featured" value="true";
                        " Feature on homepage"
                    }
                    p { button.button type="submit" { "Upload Video" } }
                }
            }

            section {
                h2 { "Gallery Videos (" (videos.len()) ")" }
                @if videos.is_empty() {
                    p { "No videos yet. Upload your first video above." }
                } @else {
                    div.grid.gallery {
                        @for video in videos {
                            figure.card {
                                video src=(video.video_url) poster=[video.thumbnail_url.as_deref()] controls preload="metadata" {}
                                figcaption {
                                    @if video.is_featured {
                                        span.status.booked { "Featured" } " "
                                    }
                                    @if let Some(title) = &video.title {
                                        strong { (title) }
                                    }
                                    @if let Some(event_type) = &video.event_type {
                                        p { (event_type) }
                                    }
                                }
                                form method="post" action={ "/admin/gallery/videos/" (video.id.to_string()) "/featured" } {
                                    input type="hidden" name="featured" value=(if video.is_featured { "false" } else { "true" });
                                    button.button type="submit" {
                                        @if video.is_featured { "Unfeature" } @else { "Feature on homepage" }
                                    }
                                }
                                form method="post" action={ "/admin/gallery/videos/" (video.id.to_string()) "/delete" }
                                    onsubmit="return confirm('Are you sure you want to delete this video?')" {
                                    button.button.danger type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn status_badge(status: InquiryStatus) -> Markup {
    html! {
        span class={ "status " (status.as_str()) } { (status.label()) }
    }
}

fn inquiry_detail(inquiry: &Inquiry) -> Markup {
    html! {
        article.card {
            header {
                h2 { (inquiry.name) }
                form method="post" action={ "/admin/inquiries/" (inquiry.id.to_string()) "/status" } {
                    select name="status" aria-label="Status" {
                        @for status in InquiryStatus::ALL {
                            option value=(status.as_str()) selected[status == inquiry.status] { (status.label()) }
                        }
                    }
                    " "
                    button.button type="submit" { "Update" }
                }
            }
            dl {
                dt { "Email:" }
                dd { a href={ "mailto:" (inquiry.email) } { (inquiry.email) } }
                @if let Some(phone) = &inquiry.phone {
                    dt { "Phone:" }
                    dd { a href={ "tel:" (phone) } { (phone) } }
                }
                dt { "Event Type:" }
                dd {
                    (inquiry.event_type)
                    @if let Some(other) = &inquiry.event_type_other {
                        " - " (other)
                    }
                }
                @if let Some(date) = inquiry.event_date {
                    dt { "Event Date:" }
                    dd { (date.format("%B %-d, %Y").to_string()) }
                }
                @if let Some(guests) = inquiry.guest_count {
                    dt { "Guests:" }
                    dd { (guests) }
                }
                dt { "Found us via:" }
                dd {
                    (inquiry.hear_about_us)
                    @if let Some(other) = &inquiry.hear_about_us_other {
                        " - " (other)
                    }
                }
                dt { "Submitted:" }
                dd { (inquiry.created_at.format("%B %-d, %Y %H:%M UTC").to_string()) }
            }
            h3 { "Message:" }
            p { (inquiry.message) }
        }
    }
}

pub fn inquiries(
    inquiries: &[Inquiry],
    selected: Option<&Inquiry>,
    notice: Option<Notice<'_>>,
) -> Markup {
    admin_layout(
        "Inquiries",
        html! {
            (header("inquiries"))
            (notice_banner(notice))

            div.admin-layout {
                nav.inquiry-list {
                    h2 { "Inquiries (" (inquiries.len()) ")" }
                    @if inquiries.is_empty() {
                        p { "No inquiries yet." }
                    }
                    @for inquiry in inquiries {
                        @let is_selected = selected.is_some_and(|s| s.id == inquiry.id);
                        a class=[is_selected.then_some("selected")] href={ "/admin/inquiries?selected=" (inquiry.id.to_string()) } {
                            strong { (inquiry.name) } " "
                            (status_badge(inquiry.status))
                            br;
                            small { (inquiry.event_type) " · " (inquiry.created_at.format("%b %-d, %Y").to_string()) }
                        }
                    }
                }
                @match selected {
                    Some(inquiry) => {
                        (inquiry_detail(inquiry))
                    }
                    None => {
                        p { "Select an inquiry to view details" }
                    }
                }
            }
        },
    )
}
