//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// Secret shipped for local development only; rejected in production
pub const DEFAULT_JWT_SECRET: &str = "development-jwt-secret-change-me";

/// JWT issuance settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_JWT_SECRET),
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

impl AuthConfig {
    /// Create an auth configuration with the given secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Whether the development secret is still in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}
