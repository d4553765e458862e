//! Content webhook: drops cached pages built from the changed document type

use crate::state::SharedState;
use crate::webhook::{is_valid_signature, SIGNATURE_HEADER};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct WebhookBody {
    #[serde(rename = "_type")]
    doc_type: Option<String>,
}

/// POST /api/revalidate
pub async fn revalidate(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    if !is_valid_signature(&state.webhook_secret, signature, &body) {
        warn!("🚫 Rejected content webhook with invalid signature");
        return (StatusCode::UNAUTHORIZED, "Invalid signature").into_response();
    }

    let doc_type = serde_json::from_slice::<WebhookBody>(&body)
        .ok()
        .and_then(|body| body.doc_type)
        .filter(|t| !t.trim().is_empty());

    let Some(doc_type) = doc_type else {
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    };

    let dropped = state.cache.invalidate_tag(&doc_type).await;
    info!("♻️  Revalidated {} ({} cached page(s) dropped)", doc_type, dropped);

    Json(json!({
        "revalidated": true,
        "now": chrono::Utc::now().timestamp_millis()
    }))
    .into_response()
}
