//! Type definitions shared by every layer
//!
//! - `language` - Internationalization and language negotiation
//! - `response` - The API response envelope

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{ApiResponse, FieldErrors};
