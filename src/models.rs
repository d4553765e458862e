//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the stored rows and the request/response structures used by the site.

pub mod gallery;
pub mod inquiry;

// Re-export commonly used types
pub use gallery::*;
pub use inquiry::*;

use serde::Serialize;

/// `{ "success": true }` acknowledgement
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
