//! Inquiry models and DTOs

use crate::error::{validation_error, AppError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kind of event the visitor is planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Proposal,
    #[serde(rename = "Baby Shower")]
    BabyShower,
    Birthday,
    #[serde(rename = "Corporate Event")]
    CorporateEvent,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Wedding,
        EventType::Proposal,
        EventType::BabyShower,
        EventType::Birthday,
        EventType::CorporateEvent,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Proposal => "Proposal",
            EventType::BabyShower => "Baby Shower",
            EventType::Birthday => "Birthday",
            EventType::CorporateEvent => "Corporate Event",
            EventType::Other => "Other",
        }
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| validation_error(format!("Unknown event type: {}", s)))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the visitor found the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HearAboutUs {
    Instagram,
    #[serde(rename = "Google Search")]
    GoogleSearch,
    #[serde(rename = "Friend/Family Referral")]
    Referral,
    #[serde(rename = "Attended one of our events")]
    AttendedEvent,
    Other,
}

impl HearAboutUs {
    pub const ALL: [HearAboutUs; 5] = [
        HearAboutUs::Instagram,
        HearAboutUs::GoogleSearch,
        HearAboutUs::Referral,
        HearAboutUs::AttendedEvent,
        HearAboutUs::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HearAboutUs::Instagram => "Instagram",
            HearAboutUs::GoogleSearch => "Google Search",
            HearAboutUs::Referral => "Friend/Family Referral",
            HearAboutUs::AttendedEvent => "Attended one of our events",
            HearAboutUs::Other => "Other",
        }
    }
}

impl FromStr for HearAboutUs {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| validation_error(format!("Unknown referral source: {}", s)))
    }
}

impl fmt::Display for HearAboutUs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inquiry lifecycle. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Booked,
    Archived,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 4] = [
        InquiryStatus::New,
        InquiryStatus::Contacted,
        InquiryStatus::Booked,
        InquiryStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Booked => "booked",
            InquiryStatus::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InquiryStatus::New => "New",
            InquiryStatus::Contacted => "Contacted",
            InquiryStatus::Booked => "Booked",
            InquiryStatus::Archived => "Archived",
        }
    }
}

impl FromStr for InquiryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| validation_error(format!("Unknown inquiry status: {}", s)))
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored inquiry row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_type_other: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub hear_about_us: String,
    pub hear_about_us_other: Option<String>,
    pub message: String,
    pub status: InquiryStatus,
}

/// Guest count arrives as a number from API clients and as a string from forms
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GuestCount {
    Number(i64),
    Text(String),
}

/// POST /api/contact request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub turnstile_token: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    pub event_type: String,

    #[serde(default)]
    pub event_type_other: Option<String>,

    #[serde(default)]
    pub event_date: Option<String>,

    #[serde(default)]
    pub guest_count: Option<GuestCount>,

    pub hear_about_us: String,

    #[serde(default)]
    pub hear_about_us_other: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Please tell us about your event"))]
    pub message: String,
}

/// Validated inquiry ready for insertion (status is always `new`)
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: EventType,
    pub event_type_other: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub hear_about_us: HearAboutUs,
    pub hear_about_us_other: Option<String>,
    pub message: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Keep the free-text companion only when the enum value is "Other"
fn other_companion(is_other: bool, value: Option<&str>, missing: &str) -> Result<Option<String>, AppError> {
    if !is_other {
        return Ok(None);
    }
    non_blank(value)
        .map(Some)
        .ok_or_else(|| validation_error(missing))
}

impl TryFrom<&ContactSubmission> for NewInquiry {
    type Error = AppError;

    fn try_from(sub: &ContactSubmission) -> Result<Self, Self::Error> {
        sub.validate().map_err(|e| validation_error(e.to_string()))?;

        let event_type: EventType = sub.event_type.parse()?;
        let hear_about_us: HearAboutUs = sub.hear_about_us.parse()?;

        let event_type_other = other_companion(
            event_type == EventType::Other,
            sub.event_type_other.as_deref(),
            "Please describe your event type",
        )?;
        let hear_about_us_other = other_companion(
            hear_about_us == HearAboutUs::Other,
            sub.hear_about_us_other.as_deref(),
            "Please tell us how you found us",
        )?;

        let event_date = match non_blank(sub.event_date.as_deref()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| validation_error("Event date must be YYYY-MM-DD"))?,
            ),
            None => None,
        };

        let guest_count = match &sub.guest_count {
            None => None,
            Some(GuestCount::Number(n)) => Some(*n),
            Some(GuestCount::Text(t)) if t.trim().is_empty() => None,
            Some(GuestCount::Text(t)) => Some(
                t.trim()
                    .parse::<i64>()
                    .map_err(|_| validation_error("Guest count must be a whole number"))?,
            ),
        }
        .map(|n| {
            i32::try_from(n)
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| validation_error("Guest count is out of range"))
        })
        .transpose()?;

        Ok(NewInquiry {
            name: sub.name.trim().to_string(),
            email: sub.email.trim().to_string(),
            phone: non_blank(sub.phone.as_deref()),
            event_type,
            event_type_other,
            event_date,
            guest_count,
            hear_about_us,
            hear_about_us_other,
            message: sub.message.trim().to_string(),
        })
    }
}

/// Admin status change form
#[derive(Debug, Deserialize)]
pub struct StatusUpdateForm {
    pub status: String,
}
