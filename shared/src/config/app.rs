//! Application-level settings: identity, debug flag, locale and external origins

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Key shipped for local development only; rejected in production
pub const DEFAULT_APP_KEY: &str = "development-app-key-change-me";

/// General application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    /// Application name, used in mail subjects and logs
    pub name: String,

    /// Attach underlying error messages to 500 responses
    #[serde(default)]
    pub debug: bool,

    /// Language used when the client expresses no supported preference
    #[serde(default)]
    pub locale: Language,

    /// Key used to sign verification links
    pub key: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: String::from("Turismo"),
            debug: false,
            locale: Language::English,
            key: String::from(DEFAULT_APP_KEY),
        }
    }
}

impl AppSettings {
    /// Whether the development key is still in use
    pub fn uses_default_key(&self) -> bool {
        self.key == DEFAULT_APP_KEY
    }
}

/// Front-end origin embedded in user-facing links
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    pub url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:3000"),
        }
    }
}

/// Public object-storage settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL stored paths are resolved against
    pub public_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_url: String::from("http://localhost:8080/storage"),
        }
    }
}
