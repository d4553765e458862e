//! Admin route handlers
//!
//! Browser-facing: every mutation answers with a redirect (post/redirect/get)
//! carrying a one-shot notice in the query string.

use crate::auth::{authenticate, create_session_token, LOGIN_PATH, SESSION_COOKIE, SESSION_HOURS};
use crate::error::{not_found_error, ApiResult, AppError};
use crate::media::{ImageUpload, UploadedFile, VideoUpload};
use crate::models::{InquiryStatus, MediaOrder, StatusUpdateForm};
use crate::pages::admin::{self, Notice};
use crate::state::SharedState;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

pub const DASHBOARD_PATH: &str = "/admin/dashboard";
pub const INQUIRIES_PATH: &str = "/admin/inquiries";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiriesQuery {
    pub selected: Option<Uuid>,
    pub success: Option<String>,
    pub error: Option<String>,
}

fn notice<'a>(success: &'a Option<String>, error: &'a Option<String>) -> Option<Notice<'a>> {
    match (success, error) {
        (_, Some(error)) => Some(Notice::Error(error)),
        (Some(success), None) => Some(Notice::Success(success)),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct FeaturedForm {
    pub featured: bool,
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    Redirect::to(&format!("{}?{}", path, query))
}

/// Dashboard redirect for a media mutation. Missing rows stay a 404.
fn flash<T>(result: Result<T, AppError>, success: &str) -> ApiResult<Redirect> {
    match result {
        Ok(_) => Ok(redirect_with(DASHBOARD_PATH, "success", success)),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) => {
            let (_, _, message) = e.parts();
            Ok(redirect_with(DASHBOARD_PATH, "error", &message))
        }
    }
}

// ============================================
// Session
// ============================================

/// GET /admin/login
pub async fn login_page() -> Html<String> {
    Html(admin::login(None, "").into_string())
}

/// POST /admin/login
pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let session = authenticate(&state.admin, &form.email, &form.password)
        .and_then(|()| create_session_token(&state.admin.jwt_secret, &state.admin.email));

    match session {
        Ok(token) => {
            info!("🔑 Admin signed in");
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .secure(state.admin.secure_cookie)
                .max_age(Duration::hours(SESSION_HOURS))
                .same_site(SameSite::Lax);
            (jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Err(e) => {
            let (status, _, message) = e.parts();
            let page = admin::login(Some(&message), &form.email);
            (status, Html(page.into_string())).into_response()
        }
    }
}

/// POST /admin/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LOGIN_PATH))
}

// ============================================
// Gallery
// ============================================

/// GET /admin/dashboard
pub async fn dashboard(
    State(state): State<SharedState>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let (images, videos) = tokio::join!(
        state.gallery.list_images(MediaOrder::Newest),
        state.gallery.list_videos(MediaOrder::Newest),
    );
    let page = admin::dashboard(&images?, &videos?, notice(&query.success, &query.error));
    Ok(Html(page.into_string()))
}

/// Multipart body split into file parts and text parts
#[derive(Default)]
struct UploadForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let invalid = |e: axum::extract::multipart::MultipartError| {
            AppError::BadRequest(format!("Invalid upload: {}", e))
        };

        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(invalid)? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            match file_name {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(invalid)?;
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(invalid)?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    fn file(&mut self, name: &str) -> UploadedFile {
        self.files.remove(name).unwrap_or(UploadedFile {
            file_name: String::new(),
            content_type: None,
            bytes: Vec::new(),
        })
    }

    fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// POST /admin/gallery/images
pub async fn upload_image(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    let result = async {
        let mut form = UploadForm::read(multipart).await?;
        let upload = ImageUpload {
            file: form.file("file"),
            event_type: form.text("event_type").unwrap_or_default(),
            caption: form.text("caption"),
        };
        state.media.upload_image(upload).await
    }
    .await;

    flash(result, "Image uploaded successfully!")
}

/// POST /admin/gallery/videos
pub async fn upload_video(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    let result = async {
        let mut form = UploadForm::read(multipart).await?;
        let upload = VideoUpload {
            file: form.file("file"),
            thumbnail: form.files.remove("thumbnail"),
            title: form.text("title"),
            event_type: form.text("event_type"),
            is_featured: form.text("is_featured").is_some_and(|v| v == "true" || v == "on"),
        };
        state.media.upload_video(upload).await
    }
    .await;

    flash(result, "Video uploaded successfully!")
}

/// POST /admin/gallery/images/{id}/delete
pub async fn delete_image(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Redirect> {
    flash(state.media.delete_image(id).await, "Image deleted successfully!")
}

/// POST /admin/gallery/videos/{id}/delete
pub async fn delete_video(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Redirect> {
    flash(state.media.delete_video(id).await, "Video deleted successfully!")
}

/// POST /admin/gallery/videos/{id}/featured
pub async fn set_featured(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(form): Form<FeaturedForm>,
) -> ApiResult<Redirect> {
    flash(
        state.media.set_featured(id, form.featured).await,
        "Featured video updated!",
    )
}

// ============================================
// Inquiries
// ============================================

/// GET /admin/inquiries
pub async fn inquiries(
    State(state): State<SharedState>,
    Query(query): Query<InquiriesQuery>,
) -> ApiResult<Html<String>> {
    let list = state.inquiries.list().await?;
    let selected = match query.selected {
        Some(id) => state.inquiries.get(id).await?,
        None => None,
    };

    let page = admin::inquiries(&list, selected.as_ref(), notice(&query.success, &query.error));
    Ok(Html(page.into_string()))
}

/// POST /admin/inquiries/{id}/status
pub async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(form): Form<StatusUpdateForm>,
) -> ApiResult<Redirect> {
    let status: InquiryStatus = form.status.parse()?;

    let inquiry = state
        .inquiries
        .update_status(id, status)
        .await?
        .ok_or_else(|| not_found_error(format!("Inquiry {} not found", id)))?;

    info!("📝 Inquiry {} marked {}", inquiry.id, inquiry.status.as_str());
    Ok(Redirect::to(&format!("{}?selected={}", INQUIRIES_PATH, inquiry.id)))
}
