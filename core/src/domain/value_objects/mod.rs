//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod dashboard;

// Re-export commonly used types
pub use auth_response::IssuedToken;
pub use dashboard::DashboardSummary;
