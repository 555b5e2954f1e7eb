//! # Turismo API
//!
//! HTTP layer of the Turismo backend: the JSON envelope, the mapping of
//! failures onto it, request validation, resource transformation and the
//! route handlers.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod resources;
pub mod routes;
pub mod state;
pub mod validation;

pub use app::create_app;
pub use handlers::{ApiError, ExceptionMapper};
pub use state::AppState;
