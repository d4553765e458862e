//! CAPTCHA verification gateway (Cloudflare Turnstile)

use crate::config::CaptchaConfig;
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(true)` when the token passes, `Ok(false)` when the service rejects it.
    /// `Err` only when no answer was obtained.
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, AppError>;
}

#[derive(Deserialize, Debug)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileVerifier {
    http: reqwest::Client,
    verify_url: String,
    secret_key: String,
}

impl TurnstileVerifier {
    pub fn new(config: &CaptchaConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            verify_url: config.verify_url.clone(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, AppError> {
        let mut form = vec![("secret", self.secret_key.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let result: SiteVerifyResponse = self
            .http
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await?
            .json()
            .await?;

        if result.success {
            debug!("Turnstile token accepted");
        } else {
            warn!("Turnstile token rejected: {:?}", result.error_codes);
        }
        Ok(result.success)
    }
}
