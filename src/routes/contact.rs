//! Inquiry API route handlers

use super::client_ip;
use crate::error::{ApiResult, AppError};
use crate::models::{ContactSubmission, SuccessResponse};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use tracing::debug;

/// POST /api/contact
///
/// Verifies the CAPTCHA token, then stores the inquiry with status `new`.
pub async fn submit_inquiry(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(submission) = payload.map_err(|e| {
        debug!("Rejected contact payload: {}", e);
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let ip = client_ip(&headers);
    state.submissions.submit(&submission, ip.as_deref()).await?;

    Ok(Json(SuccessResponse::ok()))
}
