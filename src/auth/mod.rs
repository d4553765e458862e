//! Admin authentication
//!
//! A single admin account (email + bcrypt hash from configuration) signs in
//! with a form and receives a JWT session cookie.

mod jwt;
mod middleware;
mod password;

pub use jwt::{create_session_token, decode_session_token, SESSION_HOURS};
pub use middleware::{require_admin, LOGIN_PATH};
pub use password::verify_password;

use crate::config::AdminConfig;
use crate::error::AppError;
use tracing::warn;

/// Cookie holding the session JWT
pub const SESSION_COOKIE: &str = "admin_session";

/// Check submitted credentials against the configured account
pub fn authenticate(config: &AdminConfig, email: &str, password: &str) -> Result<(), AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    if config.email.is_empty() || config.password_hash.is_empty() {
        warn!("Admin login attempted but no admin account is configured");
        return Err(invalid());
    }
    if !email.trim().eq_ignore_ascii_case(&config.email) {
        return Err(invalid());
    }
    if !verify_password(password, &config.password_hash)? {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            email: "owner@example.com".into(),
            password_hash: bcrypt::hash("correct horse", 4).unwrap(),
            jwt_secret: "secret".into(),
            secure_cookie: true,
        }
    }

    #[test]
    fn test_authenticate() {
        let config = config();
        assert!(authenticate(&config, "Owner@Example.com ", "correct horse").is_ok());
        assert!(authenticate(&config, "owner@example.com", "wrong").is_err());
        assert!(authenticate(&config, "someone@example.com", "correct horse").is_err());
    }

    #[test]
    fn test_unconfigured_account_rejects_everyone() {
        let config = AdminConfig::default();
        assert!(config.jwt_secret.is_empty());
        assert!(matches!(
            authenticate(&config, "", ""),
            Err(AppError::Unauthorized(_))
        ));
    }
}
