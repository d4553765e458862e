//! Route definitions and router setup
//!
//! Configures all page, API and admin routes and middleware.

mod admin;
mod contact;
mod pages;
mod revalidate;

use crate::auth::require_admin;
use crate::config::Settings;
use crate::state::SharedState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderMap, Method},
    middleware::from_fn_with_state,
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Upper bound for a single gallery upload request
const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Admin routes behind the session check
    let admin_routes = Router::new()
        .route("/admin", get(|| async { Redirect::to(admin::DASHBOARD_PATH) }))
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/gallery/images",
            post(admin::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/admin/gallery/images/{id}/delete", post(admin::delete_image))
        .route(
            "/admin/gallery/videos",
            post(admin::upload_video).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/admin/gallery/videos/{id}/delete", post(admin::delete_video))
        .route("/admin/gallery/videos/{id}/featured", post(admin::set_featured))
        .route("/admin/inquiries", get(admin::inquiries))
        .route("/admin/inquiries/{id}/status", post(admin::update_status))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Public pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/gallery", get(pages::gallery))
        .route("/contact", get(pages::contact).post(pages::submit_contact))

        // API
        .route("/api/contact", post(contact::submit_inquiry))
        .route("/api/revalidate", post(revalidate::revalidate))

        // Admin session
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .merge(admin_routes)

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Visitor address as reported by the edge proxy
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("cf-connecting-ip")
        .or_else(|| header("x-forwarded-for").and_then(|v| v.split(',').next()).map(str::trim))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running fine.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{create_session_token, SESSION_COOKIE};
    use crate::config::{AdminConfig, ContentConfig};
    use crate::content::ContentClient;
    use crate::models::{
        ContactSubmission, EventType, HearAboutUs, InquiryStatus, NewInquiry,
    };
    use crate::state::{AppState, Backends};
    use crate::store::memory::{MemoryGallery, MemoryInquiries, MemoryObjects, StaticCaptcha};
    use crate::store::{GalleryRepository, InquiryRepository};
    use crate::webhook::{sign, SIGNATURE_HEADER};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, Response, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const ADMIN_EMAIL: &str = "owner@example.com";
    const JWT_SECRET: &str = "test-jwt-secret";
    const WEBHOOK_SECRET: &str = "test-webhook-secret";

    struct Harness {
        app: Router,
        state: SharedState,
        inquiries: Arc<MemoryInquiries>,
        gallery: Arc<MemoryGallery>,
        objects: Arc<MemoryObjects>,
    }

    fn admin_config(jwt_secret: &str) -> AdminConfig {
        AdminConfig {
            email: ADMIN_EMAIL.into(),
            password_hash: bcrypt::hash("correct horse", 4).unwrap(),
            jwt_secret: jwt_secret.into(),
            secure_cookie: true,
        }
    }

    fn harness() -> Harness {
        harness_with(admin_config(JWT_SECRET))
    }

    fn harness_with(admin: AdminConfig) -> Harness {
        let mut settings = Settings::default();
        settings.admin = admin;
        settings.cache.webhook_secret = WEBHOOK_SECRET.into();
        settings.captcha.site_key = "site-key".into();

        let inquiries = Arc::new(MemoryInquiries::default());
        let gallery = Arc::new(MemoryGallery::default());
        let objects = Arc::new(MemoryObjects::default());
        let backends = Backends {
            inquiries: inquiries.clone(),
            gallery: gallery.clone(),
            storage: objects.clone(),
            captcha: Arc::new(StaticCaptcha::default()),
            content: ContentClient::new(&ContentConfig::default()).unwrap(),
        };

        let state = Arc::new(AppState::new(backends, &settings));
        Harness {
            app: create_router(state.clone(), &settings),
            state,
            inquiries,
            gallery,
            objects,
        }
    }

    fn session_cookie() -> String {
        let token = create_session_token(JWT_SECRET, ADMIN_EMAIL).unwrap();
        format!("{}={}", SESSION_COOKIE, token)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn admin_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, session_cookie())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn admin_get(uri: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, session_cookie())
            .body(Body::empty())
            .unwrap()
    }

    fn inquiry_payload(token: &str) -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "eventType": "Wedding",
            "hearAboutUs": "Instagram",
            "message": "Garden ceremony for 80",
            "guestCount": "80",
            "turnstileToken": token
        })
    }

    async fn seed_inquiry(repo: &MemoryInquiries) -> Uuid {
        let submission: ContactSubmission = serde_json::from_value(inquiry_payload("valid")).unwrap();
        let new = NewInquiry::try_from(&submission).unwrap();
        assert_eq!(new.event_type, EventType::Wedding);
        assert_eq!(new.hear_about_us, HearAboutUs::Instagram);
        repo.insert(new).await.unwrap().id
    }

    #[tokio::test]
    async fn test_health_check() {
        let h = harness();
        let response = send(&h.app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], json!(true));
    }

    #[tokio::test]
    async fn test_contact_api_stores_new_inquiry() {
        let h = harness();
        let response = send(&h.app, post_json("/api/contact", inquiry_payload("valid"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, json!({ "success": true }));

        let rows = h.inquiries.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, InquiryStatus::New);
        assert_eq!(rows[0].guest_count, Some(80));
    }

    #[tokio::test]
    async fn test_contact_api_rejects_bad_token() {
        let h = harness();
        let response = send(&h.app, post_json("/api/contact", inquiry_payload("forged"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], json!("CAPTCHA verification failed. Please try again."));
        assert_eq!(h.inquiries.count().await, 0);
    }

    #[tokio::test]
    async fn test_contact_api_rejects_malformed_body() {
        let h = harness();
        let request = Request::post("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.inquiries.count().await, 0);
    }

    #[tokio::test]
    async fn test_contact_page_form_post() {
        let h = harness();
        let form = "name=Ada&email=ada%40example.com&eventType=Wedding&hearAboutUs=Instagram\
                    &message=Hello&cf-turnstile-response=valid";
        let request = Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Submit another inquiry"));
        assert_eq!(h.inquiries.count().await, 1);
    }

    #[tokio::test]
    async fn test_contact_page_without_token_keeps_fields() {
        let h = harness();
        let request = Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Ada&message=Hello"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page = body_text(response).await;
        assert!(page.contains("Please complete the CAPTCHA verification."));
        assert!(page.contains(r#"value="Ada""#));
        assert_eq!(h.inquiries.count().await, 0);
    }

    #[tokio::test]
    async fn test_public_pages_render_with_fallbacks() {
        let h = harness();
        for path in ["/", "/about", "/services", "/gallery", "/contact"] {
            let response = send(&h.app, Request::get(path).body(Body::empty()).unwrap()).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
            assert!(body_text(response).await.starts_with("<!DOCTYPE html>"));
        }
        assert!(h.state.cache.get("/gallery").await.is_some());
    }

    #[tokio::test]
    async fn test_admin_pages_require_session() {
        let h = harness();
        for path in ["/admin/dashboard", "/admin/inquiries"] {
            let response = send(&h.app, Request::get(path).body(Body::empty()).unwrap()).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
            assert_eq!(location(&response), "/admin/login");
        }

        let request = Request::get("/admin/dashboard")
            .header(header::COOKIE, format!("{}=garbage", SESSION_COOKIE))
            .body(Body::empty())
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let h = harness();
        let request = Request::post("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=owner%40example.com&password=correct+horse"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/dashboard");

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cookie.starts_with("admin_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=28800"));

        let request = Request::post("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=owner%40example.com&password=wrong"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid email or password"));
    }

    #[tokio::test]
    async fn test_login_cookie_without_secure_flag_when_disabled() {
        let mut admin = admin_config(JWT_SECRET);
        admin.secure_cookie = false;
        let h = harness_with(admin);
        let request = Request::post("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=owner%40example.com&password=correct+horse"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=28800"));
    }

    #[tokio::test]
    async fn test_sessions_disabled_without_jwt_secret() {
        let h = harness_with(admin_config(""));

        // A token signed with a well-known development secret must not open the admin area
        let forged =
            create_session_token("blithe-dev-secret-change-in-production", ADMIN_EMAIL).unwrap();
        let request = Request::get("/admin/dashboard")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, forged))
            .body(Body::empty())
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");

        let request = Request::post("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=owner%40example.com&password=correct+horse"))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_dashboard_renders_with_session() {
        let h = harness();
        let response = send(&h.app, admin_get("/admin/dashboard?success=Image+uploaded+successfully%21")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_text(response).await;
        assert!(page.contains("Upload New Image"));
        assert!(page.contains("Image uploaded successfully!"));
    }

    #[tokio::test]
    async fn test_status_update_persists() {
        let h = harness();
        let id = seed_inquiry(&h.inquiries).await;

        let response = send(
            &h.app,
            admin_form(&format!("/admin/inquiries/{}/status", id), "status=booked"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/admin/inquiries?selected={}", id));

        let stored = h.inquiries.get(id).await.unwrap().unwrap();
        assert_eq!(stored.status, InquiryStatus::Booked);

        let response = send(&h.app, admin_get(&format!("/admin/inquiries?selected={}", id))).await;
        let page = body_text(response).await;
        assert!(page.contains(r#"<option value="booked" selected>Booked</option>"#));
    }

    #[tokio::test]
    async fn test_inquiries_detail_loads_selected_row() {
        let h = harness();
        let id = seed_inquiry(&h.inquiries).await;

        let response = send(&h.app, admin_get(&format!("/admin/inquiries?selected={}", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Garden ceremony for 80"));
        assert!(!page.contains("Select an inquiry to view details"));

        let response = send(
            &h.app,
            admin_get(&format!("/admin/inquiries?selected={}", Uuid::new_v4())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Select an inquiry to view details"));
    }

    #[tokio::test]
    async fn test_status_update_rejects_unknown_status_and_id() {
        let h = harness();
        let id = seed_inquiry(&h.inquiries).await;

        let response = send(
            &h.app,
            admin_form(&format!("/admin/inquiries/{}/status", id), "status=done"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            h.inquiries.get(id).await.unwrap().unwrap().status,
            InquiryStatus::New
        );

        let response = send(
            &h.app,
            admin_form(&format!("/admin/inquiries/{}/status", Uuid::new_v4()), "status=booked"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_featured_toggle_keeps_single_featured() {
        let h = harness();
        let first = h.gallery.seed_video(true).await;
        let second = h.gallery.seed_video(false).await;

        let response = send(
            &h.app,
            admin_form(&format!("/admin/gallery/videos/{}/featured", second.id), "featured=true"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/admin/dashboard?success="));

        assert_eq!(h.gallery.featured_count().await, 1);
        let featured = h.gallery.featured_video().await.unwrap().unwrap();
        assert_eq!(featured.id, second.id);
        assert!(!h.gallery.get_video(first.id).await.unwrap().unwrap().is_featured);
    }

    #[tokio::test]
    async fn test_delete_missing_image_is_not_found() {
        let h = harness();
        let response = send(
            &h.app,
            admin_form(&format!("/admin/gallery/images/{}/delete", Uuid::new_v4()), ""),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_upload_via_multipart() {
        let h = harness();
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"party.JPG\"\r\n\
             Content-Type: image/jpeg\r\n\r\n\
             jpegbytes\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"event_type\"\r\n\r\n\
             Birthday\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
             Cake time\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::post("/admin/gallery/images")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .header(header::COOKIE, session_cookie())
            .body(Body::from(body))
            .unwrap();

        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/admin/dashboard?success=Image+uploaded+successfully%21"
        );

        let images = h.gallery.list_images(crate::models::MediaOrder::Newest).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].event_type, "Birthday");
        assert_eq!(images[0].caption.as_deref(), Some("Cake time"));
        assert_eq!(h.objects.count().await, 1);
    }

    #[tokio::test]
    async fn test_webhook_rejects_forged_signature() {
        let h = harness();
        h.state.cache.put("/about", &["aboutPage"], "<p>cached</p>".into(), 0).await;

        let body = json!({ "_type": "aboutPage" }).to_string();
        let ts = chrono::Utc::now().timestamp_millis();
        let request = Request::post("/api/revalidate")
            .header(SIGNATURE_HEADER, sign("wrong-secret", ts, body.as_bytes()))
            .body(Body::from(body))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Invalid signature");
        assert!(h.state.cache.get("/about").await.is_some());
    }

    #[tokio::test]
    async fn test_webhook_invalidates_tagged_pages() {
        let h = harness();
        h.state.cache.put("/about", &["aboutPage"], "<p>cached</p>".into(), 0).await;
        h.state.cache.put("/services", &["servicesPage"], "<p>cached</p>".into(), 0).await;

        let body = json!({ "_type": "aboutPage", "_id": "about" }).to_string();
        let ts = chrono::Utc::now().timestamp_millis();
        let request = Request::post("/api/revalidate")
            .header(SIGNATURE_HEADER, sign(WEBHOOK_SECRET, ts, body.as_bytes()))
            .body(Body::from(body))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["revalidated"], json!(true));
        assert!(reply["now"].is_i64());
        assert!(h.state.cache.get("/about").await.is_none());
        assert!(h.state.cache.get("/services").await.is_some());
    }

    #[tokio::test]
    async fn test_webhook_without_type_is_bad_request() {
        let h = harness();
        let body = json!({ "_id": "about" }).to_string();
        let ts = chrono::Utc::now().timestamp_millis();
        let request = Request::post("/api/revalidate")
            .header(SIGNATURE_HEADER, sign(WEBHOOK_SECRET, ts, body.as_bytes()))
            .body(Body::from(body))
            .unwrap();
        let response = send(&h.app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_client_ip_prefers_edge_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), None);

        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers).as_deref(), Some("203.0.113.7"));

        headers.insert("cf-connecting-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers).as_deref(), Some("198.51.100.2"));
    }
}
