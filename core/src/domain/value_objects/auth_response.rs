//! Token handed back to clients after login or registration

use serde::{Deserialize, Serialize};

/// An issued bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until expiry
    pub expires_in: i64,
}

impl IssuedToken {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
