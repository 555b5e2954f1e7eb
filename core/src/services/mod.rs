//! Business services containing domain logic and use cases.

pub mod auth;
pub mod dashboard;
pub mod mail;
pub mod storage;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Registration};
pub use dashboard::DashboardService;
pub use mail::{InMemoryMailQueue, LinkBuilder, MailJob, MailKind, MailQueue, VerificationParams};
pub use storage::{resolve_public_url, StorageUrlResolver};
pub use token::TokenService;
pub use user::{ProfileUpdate, UserService};
