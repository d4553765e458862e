//! Public page route handlers
//!
//! Each page is rendered from CMS content plus media rows, cached by path and
//! tagged with every source it was built from.

use super::client_ip;
use crate::cache::{GALLERY_IMAGES_TAG, GALLERY_VIDEOS_TAG};
use crate::content::queries::{
    ABOUT_PAGE, CONTACT_PAGE, GALLERY_PAGE, HOME_PAGE, SERVICE, SERVICES_PAGE, SITE_SETTINGS,
};
use crate::form::{ContactForm, ContactFormPost};
use crate::models::{GalleryImage, GalleryVideo, MediaOrder};
use crate::pages::{layout, public};
use crate::state::{AppState, SharedState};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
    Form,
};
use maud::Markup;
use std::future::Future;
use tracing::{debug, warn};

/// Serve `key` from the cache, or render and store it under `tags`
async fn cached<F, Fut>(state: &AppState, key: &str, tags: &[&str], render: F) -> Html<String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Markup>,
{
    if let Some(html) = state.cache.get(key).await {
        debug!("Cache hit for {}", key);
        return Html(html);
    }

    let epoch = state.cache.epoch().await;
    let html = render().await.into_string();
    state.cache.put(key, tags, html.clone(), epoch).await;
    Html(html)
}

// Media read failures degrade to an empty section rather than a failed page.

async fn images(state: &AppState) -> Vec<GalleryImage> {
    state
        .gallery
        .list_images(MediaOrder::Display)
        .await
        .unwrap_or_else(|e| {
            warn!("⚠️  Failed to load gallery images: {}", e);
            Vec::new()
        })
}

async fn videos(state: &AppState) -> Vec<GalleryVideo> {
    state
        .gallery
        .list_videos(MediaOrder::Display)
        .await
        .unwrap_or_else(|e| {
            warn!("⚠️  Failed to load gallery videos: {}", e);
            Vec::new()
        })
}

async fn featured_video(state: &AppState) -> Option<GalleryVideo> {
    state.gallery.featured_video().await.unwrap_or_else(|e| {
        warn!("⚠️  Failed to load featured video: {}", e);
        None
    })
}

/// GET /
pub async fn home(State(state): State<SharedState>) -> Html<String> {
    let state = state.as_ref();
    let tags = [HOME_PAGE, SERVICE, SITE_SETTINGS, GALLERY_VIDEOS_TAG];
    cached(state, "/", &tags, || async move {
        let (settings, content, services, featured) = tokio::join!(
            state.content.site_settings(),
            state.content.home_page(),
            state.content.services(),
            featured_video(state),
        );
        layout(
            settings.as_ref(),
            "/",
            public::home(content.as_ref(), &services, featured.as_ref()),
        )
    })
    .await
}

/// GET /about
pub async fn about(State(state): State<SharedState>) -> Html<String> {
    let state = state.as_ref();
    cached(state, "/about", &[ABOUT_PAGE, SITE_SETTINGS], || async move {
        let (settings, content) =
            tokio::join!(state.content.site_settings(), state.content.about_page());
        layout(settings.as_ref(), "/about", public::about(content.as_ref()))
    })
    .await
}

/// GET /services
pub async fn services(State(state): State<SharedState>) -> Html<String> {
    let state = state.as_ref();
    let tags = [SERVICES_PAGE, SERVICE, SITE_SETTINGS];
    cached(state, "/services", &tags, || async move {
        let (settings, content, services) = tokio::join!(
            state.content.site_settings(),
            state.content.services_page(),
            state.content.services(),
        );
        layout(
            settings.as_ref(),
            "/services",
            public::services(content.as_ref(), &services),
        )
    })
    .await
}

/// GET /gallery
pub async fn gallery(State(state): State<SharedState>) -> Html<String> {
    let state = state.as_ref();
    let tags = [GALLERY_PAGE, SITE_SETTINGS, GALLERY_IMAGES_TAG, GALLERY_VIDEOS_TAG];
    cached(state, "/gallery", &tags, || async move {
        let (settings, content, images, videos) = tokio::join!(
            state.content.site_settings(),
            state.content.gallery_page(),
            images(state),
            videos(state),
        );
        layout(
            settings.as_ref(),
            "/gallery",
            public::gallery(content.as_ref(), &images, &videos),
        )
    })
    .await
}

async fn render_contact(state: &AppState, form: &ContactForm) -> Markup {
    let (settings, content) =
        tokio::join!(state.content.site_settings(), state.content.contact_page());
    layout(
        settings.as_ref(),
        "/contact",
        public::contact(content.as_ref(), form, &state.turnstile_site_key),
    )
}

/// GET /contact
pub async fn contact(State(state): State<SharedState>) -> Html<String> {
    let state = state.as_ref();
    cached(state, "/contact", &[CONTACT_PAGE, SITE_SETTINGS], || async move {
        render_contact(state, &ContactForm::new()).await
    })
    .await
}

/// POST /contact
///
/// Runs one pass of the form state machine and renders the outcome. Never cached.
pub async fn submit_contact(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(post): Form<ContactFormPost>,
) -> (StatusCode, Html<String>) {
    let mut form = ContactForm::from_post(post);
    let mut status = StatusCode::OK;

    match form.begin_submit() {
        Ok(submission) => {
            let ip = client_ip(&headers);
            let outcome = match state.submissions.submit(&submission, ip.as_deref()).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    let (code, _, message) = e.parts();
                    status = code;
                    Err(message)
                }
            };
            form.complete(outcome);
        }
        Err(e) => {
            debug!("Contact form not submitted: {}", e);
            status = StatusCode::BAD_REQUEST;
        }
    }

    let page = render_contact(&state, &form).await;
    (status, Html(page.into_string()))
}
