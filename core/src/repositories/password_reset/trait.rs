//! Storage for pending password-reset tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// A pending reset request; only the token's hash is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRecord {
    pub email: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for password-reset tokens, one pending token per email
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Store a token hash, replacing any pending one for the same email
    async fn store(&self, record: PasswordResetRecord) -> Result<(), DomainError>;

    /// Find the pending token for an email
    async fn find(&self, email: &str) -> Result<Option<PasswordResetRecord>, DomainError>;

    /// Remove the pending token for an email
    async fn delete(&self, email: &str) -> Result<(), DomainError>;
}
