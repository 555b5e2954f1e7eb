//! API response envelope

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field-level validation messages, keyed by field name.
///
/// Ordered so that the same errors always serialize to the same bytes.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Message used by every validation failure envelope
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

/// Uniform envelope wrapping every API response
///
/// Success: `{ "success": true, "message": string|null, "data": <payload> }`
/// Error:   `{ "success": false, "message": string, "errors"?: { field: [string] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable message; always serialized, `null` when absent
    #[serde(default)]
    pub message: Option<String>,

    /// Response data (success only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Field errors (validation failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
            errors: None,
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiResponse<()> {
    /// Create an error response. `errors` is only serialized when supplied.
    pub fn error(message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }

    /// Validation failure carrying the per-field messages
    pub fn validation_error(errors: FieldErrors) -> Self {
        Self::error(VALIDATION_ERROR_MESSAGE, Some(errors))
    }
}
