//! Shared utilities and common types for the Turismo server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The JSON response envelope returned by every endpoint
//! - Language negotiation for localized messages
//! - Log masking helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, Environment, FrontendConfig, MailConfig,
    ServerConfig, StorageConfig,
};
pub use types::{ApiResponse, FieldErrors, Language};
