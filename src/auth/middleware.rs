//! Admin session middleware
//!
//! Admin pages are browser pages, so a missing or invalid session redirects
//! to the login form instead of answering 401.

use crate::auth::{decode_session_token, SESSION_COOKIE};
use crate::state::SharedState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

pub const LOGIN_PATH: &str = "/admin/login";

pub async fn require_admin(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .map(|cookie| decode_session_token(&state.admin.jwt_secret, cookie.value()));

    match claims {
        Some(Ok(claims)) if claims.sub == state.admin.email => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Some(Err(e)) => {
            debug!("Rejected admin session: {}", e);
            Redirect::to(LOGIN_PATH).into_response()
        }
        _ => Redirect::to(LOGIN_PATH).into_response(),
    }
}
