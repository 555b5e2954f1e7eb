//! Claims carried by issued access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// JWT issuer
pub const JWT_ISSUER: &str = "turismo";

/// JWT audience
pub const JWT_AUDIENCE: &str = "turismo-api";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    pub email: String,

    /// Role names at issue time
    #[serde(default)]
    pub roles: Vec<String>,

    /// Effective permission names (direct and inherited) at issue time
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    /// Creates claims for a user; the user's roles should be loaded with their permissions
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            sub: user.id.to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at.timestamp() + ttl_seconds,
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            email: user.email.clone(),
            roles: user.role_names(),
            permissions: user.all_permission_names(),
        }
    }

    /// Parses the subject back into a user id
    pub fn user_id(&self) -> Option<u64> {
        self.sub.parse().ok()
    }
}
