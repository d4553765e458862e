//! Contact form state machine
//!
//! ```text
//! idle ──submit──► submitting ──2xx──► success ──submit another──► idle
//!   ▲                  │
//!   └──── error ◄──────┘ (fields kept, message shown)
//! ```
//!
//! The contact page drives one machine per request: fields and the CAPTCHA
//! token come from the posted form, the outcome from the submission pipeline.

use crate::models::{ContactSubmission, GuestCount};
use serde::Deserialize;
use thiserror::Error;

pub const MISSING_TOKEN_MESSAGE: &str = "Please complete the CAPTCHA verification.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong. Please try again or contact us on Instagram.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please complete the CAPTCHA verification.")]
    MissingToken,

    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("form cannot be submitted while {0:?}")]
    NotReady(FormStatus),
}

/// Raw field values, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub event_type_other: String,
    pub event_date: String,
    pub guest_count: String,
    pub hear_about_us: String,
    pub hear_about_us_other: String,
    pub message: String,
}

impl ContactFormFields {
    fn has_required(&self) -> bool {
        let filled = |v: &str| !v.trim().is_empty();
        filled(&self.name)
            && filled(&self.email)
            && filled(&self.event_type)
            && filled(&self.hear_about_us)
            && filled(&self.message)
            && (self.event_type != "Other" || filled(&self.event_type_other))
            && (self.hear_about_us != "Other" || filled(&self.hear_about_us_other))
    }

    fn to_submission(&self, token: &str) -> ContactSubmission {
        let text = |v: &str| Some(v.to_string());
        ContactSubmission {
            turnstile_token: Some(token.to_string()),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: text(&self.phone),
            event_type: self.event_type.clone(),
            event_type_other: text(&self.event_type_other),
            event_date: text(&self.event_date),
            guest_count: Some(GuestCount::Text(self.guest_count.clone())),
            hear_about_us: self.hear_about_us.clone(),
            hear_about_us_other: text(&self.hear_about_us_other),
            message: self.message.trim().to_string(),
        }
    }
}

/// `POST /contact` body: the fields plus the widget's hidden token input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFormPost {
    #[serde(flatten)]
    pub fields: ContactFormFields,
    #[serde(rename = "cf-turnstile-response", default)]
    pub turnstile_token: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    token: Option<String>,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form restored from a post, still idle
    pub fn from_post(post: ContactFormPost) -> Self {
        let mut form = Self {
            fields: post.fields,
            ..Self::default()
        };
        form.set_token(Some(post.turnstile_token));
        form
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Widget callback; blank tokens count as none
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty());
    }

    #[cfg(test)]
    pub fn can_submit(&self) -> bool {
        self.token.is_some() && matches!(self.status, FormStatus::Idle | FormStatus::Error(_))
    }

    /// idle/error → submitting. Produces the payload to send.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, FormError> {
        if !matches!(self.status, FormStatus::Idle | FormStatus::Error(_)) {
            return Err(FormError::NotReady(self.status.clone()));
        }
        let Some(token) = self.token.clone() else {
            self.status = FormStatus::Error(MISSING_TOKEN_MESSAGE.to_string());
            return Err(FormError::MissingToken);
        };
        if !self.fields.has_required() {
            self.status = FormStatus::Error(MISSING_FIELDS_MESSAGE.to_string());
            return Err(FormError::MissingFields);
        }
        self.status = FormStatus::Submitting;
        Ok(self.fields.to_submission(&token))
    }

    /// submitting → success (fields and token cleared) or error (fields kept)
    pub fn complete(&mut self, outcome: Result<(), String>) {
        if self.status != FormStatus::Submitting {
            return;
        }
        match outcome {
            Ok(()) => {
                self.fields = ContactFormFields::default();
                self.token = None;
                self.status = FormStatus::Success;
            }
            Err(msg) => {
                let msg = if msg.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    msg
                };
                self.status = FormStatus::Error(msg);
            }
        }
    }

    /// success → idle. The page's "Submit another inquiry" link serves a fresh idle form.
    #[cfg(test)]
    pub fn submit_another(&mut self) {
        if self.status == FormStatus::Success {
            self.status = FormStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> ContactFormFields {
        ContactFormFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            event_type: "Wedding".into(),
            hear_about_us: "Instagram".into(),
            message: "Garden ceremony".into(),
            guest_count: "80".into(),
            ..ContactFormFields::default()
        }
    }

    fn ready() -> ContactForm {
        let mut form = ContactForm { fields: filled(), ..ContactForm::new() };
        form.set_token(Some("tok".into()));
        form
    }

    #[test]
    fn test_missing_token_moves_to_error() {
        let mut form = ContactForm { fields: filled(), ..ContactForm::new() };
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit().unwrap_err(), FormError::MissingToken);
        assert_eq!(form.error_message(), Some(MISSING_TOKEN_MESSAGE));
        assert_eq!(form.fields, filled());
    }

    #[test]
    fn test_blank_token_is_no_token() {
        let mut form = ContactForm { fields: filled(), ..ContactForm::new() };
        form.set_token(Some("  ".into()));
        assert!(!form.can_submit());
    }

    #[test]
    fn test_other_companion_required() {
        let mut form = ready();
        form.fields.event_type = "Other".into();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::MissingFields);

        form.fields.event_type_other = "Anniversary".into();
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_success_clears_fields_and_token() {
        let mut form = ready();
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.turnstile_token.as_deref(), Some("tok"));
        assert_eq!(form.status(), &FormStatus::Submitting);
        assert!(!form.can_submit());

        form.complete(Ok(()));
        assert_eq!(form.status(), &FormStatus::Success);
        assert_eq!(form.fields, ContactFormFields::default());
        assert!(!form.can_submit());

        form.submit_another();
        assert_eq!(form.status(), &FormStatus::Idle);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_failure_keeps_fields_and_surfaces_message() {
        let mut form = ready();
        form.begin_submit().unwrap();
        form.complete(Err("CAPTCHA verification failed. Please try again.".into()));
        assert_eq!(
            form.error_message(),
            Some("CAPTCHA verification failed. Please try again.")
        );
        assert_eq!(form.fields, filled());
        assert!(form.can_submit());

        form.begin_submit().unwrap();
        form.complete(Err(String::new()));
        assert_eq!(form.error_message(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_cannot_resubmit_while_submitting() {
        let mut form = ready();
        form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(FormError::NotReady(_))));
    }

    #[test]
    fn test_posted_form_decodes() {
        let post: ContactFormPost = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "eventType": "Birthday",
            "cf-turnstile-response": "tok"
        }))
        .unwrap();
        let form = ContactForm::from_post(post);
        assert_eq!(form.fields.event_type, "Birthday");
        assert!(form.can_submit());
    }
}
