//! Repository interfaces and in-memory implementations.
//!
//! The traits define the persistence boundary; the in-memory implementations
//! back local development and tests.

pub mod dashboard;
pub mod password_reset;
pub mod user;

pub use dashboard::{CatalogueCounts, DashboardRepository, InMemoryDashboardRepository};
pub use password_reset::{InMemoryPasswordResetRepository, PasswordResetRecord, PasswordResetRepository};
pub use user::{InMemoryUserRepository, UserRepository};
