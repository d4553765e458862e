//! Inquiry submission pipeline
//!
//! token check → CAPTCHA verification → payload mapping → single insert.
//! Every failure is terminal for the request; nothing is retried.

use crate::captcha::CaptchaVerifier;
use crate::error::AppError;
use crate::models::{ContactSubmission, Inquiry, NewInquiry};
use crate::store::InquiryRepository;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const MISSING_TOKEN: &str = "Please complete the CAPTCHA verification.";
pub const CAPTCHA_FAILED: &str = "CAPTCHA verification failed. Please try again.";
pub const SUBMIT_FAILED: &str = "Failed to submit inquiry. Please try again.";

#[derive(Clone)]
pub struct InquiryService {
    captcha: Arc<dyn CaptchaVerifier>,
    inquiries: Arc<dyn InquiryRepository>,
}

impl InquiryService {
    pub fn new(captcha: Arc<dyn CaptchaVerifier>, inquiries: Arc<dyn InquiryRepository>) -> Self {
        Self { captcha, inquiries }
    }

    pub async fn submit(
        &self,
        submission: &ContactSubmission,
        remote_ip: Option<&str>,
    ) -> Result<Inquiry, AppError> {
        let token = submission
            .turnstile_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Verification(MISSING_TOKEN.to_string()))?;

        if !self.captcha.verify(token, remote_ip).await? {
            warn!("Inquiry rejected: CAPTCHA verification failed");
            return Err(AppError::Verification(CAPTCHA_FAILED.to_string()));
        }

        let new = NewInquiry::try_from(submission)?;

        let inquiry = self.inquiries.insert(new).await.map_err(|e| {
            error!("Failed to persist inquiry: {}", e);
            AppError::Persistence(SUBMIT_FAILED.to_string())
        })?;

        info!("📨 New {} inquiry {}", inquiry.event_type, inquiry.id);
        Ok(inquiry)
    }
}
