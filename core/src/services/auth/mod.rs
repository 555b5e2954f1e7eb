//! Authentication service module
//!
//! Account lifecycle around the token service:
//! - Registration and login
//! - Password reset via emailed links
//! - Email verification via signed links

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{generate_reset_token, hash_password, hash_token, verify_password, RESET_TOKEN_LENGTH};
pub use service::{AuthService, Registration};
