//! Admin session tokens
//!
//! A session is a signed JWT carried in an HttpOnly cookie.

use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session lifetime (8 hours)
pub const SESSION_HOURS: i64 = 8;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Admin email
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Create a session token for the admin account
pub fn create_session_token(secret: &str, email: &str) -> Result<String, AppError> {
    if secret.is_empty() {
        return Err(AppError::Unauthorized("Sessions are disabled".to_string()));
    }

    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        exp: (now + Duration::hours(SESSION_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))
}

/// Decode and validate a session token
pub fn decode_session_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    if secret.is_empty() {
        return Err(AppError::Unauthorized("Sessions are disabled".to_string()));
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Session expired".to_string())
        }
        _ => AppError::Unauthorized(format!("Invalid session: {}", e)),
    })?;

    Ok(token_data.claims)
}
