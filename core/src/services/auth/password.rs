//! Password hashing and reset-token helpers

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

pub const RESET_TOKEN_LENGTH: usize = 64;

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a bcrypt hash; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Random alphanumeric token for password-reset links
pub fn generate_reset_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Hex SHA-256 of a token, the only form that is stored
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
