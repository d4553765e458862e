//! Server-rendered HTML
//!
//! Page renderers are plain functions from already-loaded data to [`Markup`];
//! loading, caching and request handling live in `routes`. Every CMS field has
//! a fixed fallback so a page renders even with no content published.

pub mod admin;
pub mod public;

use crate::content::SiteSettings;
use chrono::Datelike;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const CSS: &str = include_str!("../../static/site.css");

pub const COMPANY_NAME: &str = "Beyond Blithe";
pub const DEFAULT_TITLE: &str = "Beyond Blithe | Event Management Toronto";
pub const DEFAULT_DESCRIPTION: &str = "Personal event management for weddings, proposals, baby showers, \
     birthdays, and corporate parties in Toronto. We treat every client like family.";
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/beyondblithe/";
pub const INSTAGRAM_HANDLE: &str = "@beyondblithe";

const NAV_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/services", "Services"),
    ("/gallery", "Gallery"),
    ("/contact", "Contact"),
];

/// CMS value, or the fallback when absent or blank
pub(crate) fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
}

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Public page chrome: navigation, content, footer
pub fn layout(settings: Option<&SiteSettings>, current_path: &str, content: Markup) -> Markup {
    let settings = settings.cloned().unwrap_or_default();
    let company = or(&settings.company_name, COMPANY_NAME);
    let instagram_url = or(&settings.instagram_url, INSTAGRAM_URL);
    let instagram_handle = or(&settings.instagram_handle, INSTAGRAM_HANDLE);

    let body = html! {
        nav.site-nav {
            a.brand href="/" { (company) }
            ul {
                @for (href, label) in NAV_LINKS {
                    li class=[(href == current_path).then_some("current")] {
                        a href=(href) { (label) }
                    }
                }
            }
        }
        main { (content) }
        footer {
            div.container.grid {
                div {
                    h3 { (company) }
                    p {
                        (or(&settings.footer_tagline,
                            "Creating memorable moments for families in Toronto. We treat every event like it's our own."))
                    }
                }
                div {
                    h4 { "Services" }
                    ul {
                        @for service in ["Weddings", "Proposals", "Baby Showers", "Birthdays", "Corporate Events"] {
                            li { (service) }
                        }
                    }
                }
                div {
                    h4 { "Contact" }
                    ul {
                        li { (or(&settings.location, "Toronto, Canada")) }
                        li { a href="/contact" { "Get in Touch" } }
                        li { a href=(instagram_url) target="_blank" rel="noopener noreferrer" { (instagram_handle) } }
                        @if let Some(url) = &settings.facebook_url {
                            li { a href=(url) target="_blank" rel="noopener noreferrer" { "Facebook" } }
                        }
                        @if let Some(url) = &settings.linkedin_url {
                            li { a href=(url) target="_blank" rel="noopener noreferrer" { "LinkedIn" } }
                        }
                    }
                }
            }
            p.container {
                "© " (chrono::Utc::now().year()) " " (company) ". All rights reserved."
            }
        }
    };

    base_document(
        or(&settings.seo_title_template, DEFAULT_TITLE),
        or(&settings.seo_default_description, DEFAULT_DESCRIPTION),
        body,
    )
}

/// Admin chrome; never cached, no CMS content
pub fn admin_layout(title: &str, content: Markup) -> Markup {
    base_document(
        &format!("{} | {} Admin", title, COMPANY_NAME),
        DEFAULT_DESCRIPTION,
        html! {
            main.container { (content) }
        },
    )
}

/// Success / error banner
pub(crate) fn banner(kind: &str, message: &str) -> Markup {
    html! {
        div class={ "banner " (kind) } role="alert" { (message) }
    }
}
