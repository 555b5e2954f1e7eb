//! Configuration module with business-specific sub-modules
//!
//! - `app` - Application identity, debug flag, locale, front-end and storage origins
//! - `auth` - JWT issuance
//! - `environment` - Environment detection
//! - `mail` - Outbound mail queue and link lifetimes
//! - `server` - HTTP server binding

pub mod app;
pub mod auth;
pub mod environment;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub use app::{AppSettings, FrontendConfig, StorageConfig};
pub use auth::AuthConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use server::ServerConfig;

use crate::types::Language;

/// Configuration loading and validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{key} must be set explicitly in production")]
    MissingSecret { key: String },
}

/// Complete application configuration combining all sub-configurations
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub app: AppSettings,
    pub auth: AuthConfig,
    pub frontend: FrontendConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = match lookup("APP_ENV").or_else(|| lookup("ENVIRONMENT")) {
            Some(value) => parse_value("APP_ENV", &value)?,
            None => defaults.environment,
        };

        let server = ServerConfig {
            host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
            port: parse_or("SERVER_PORT", &lookup, defaults.server.port)?,
            workers: parse_or("SERVER_WORKERS", &lookup, defaults.server.workers)?,
        };

        let app = AppSettings {
            name: lookup("APP_NAME").unwrap_or(defaults.app.name),
            debug: match lookup("APP_DEBUG") {
                Some(value) => parse_bool("APP_DEBUG", &value)?,
                None => defaults.app.debug,
            },
            locale: match lookup("APP_LOCALE") {
                Some(value) => Language::from_str(&value).map_err(|_| ConfigError::InvalidValue {
                    key: "APP_LOCALE".to_string(),
                    value,
                })?,
                None => defaults.app.locale,
            },
            key: lookup("APP_KEY").unwrap_or(defaults.app.key),
        };

        let auth = AuthConfig {
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.auth.jwt_secret),
            token_ttl_seconds: parse_or("JWT_TTL", &lookup, defaults.auth.token_ttl_seconds)?,
        };

        let frontend = FrontendConfig {
            url: lookup("FRONTEND_URL").unwrap_or(defaults.frontend.url),
        };

        let storage = StorageConfig {
            public_url: lookup("STORAGE_PUBLIC_URL").unwrap_or(defaults.storage.public_url),
        };

        let mail = MailConfig {
            from_address: lookup("MAIL_FROM_ADDRESS").unwrap_or(defaults.mail.from_address),
            from_name: lookup("MAIL_FROM_NAME").unwrap_or(defaults.mail.from_name),
            queue_capacity: parse_or("MAIL_QUEUE_CAPACITY", &lookup, defaults.mail.queue_capacity)?,
            verification_expire_minutes: parse_or(
                "MAIL_VERIFICATION_EXPIRE",
                &lookup,
                defaults.mail.verification_expire_minutes,
            )?,
            password_reset_expire_minutes: parse_or(
                "MAIL_PASSWORD_RESET_EXPIRE",
                &lookup,
                defaults.mail.password_reset_expire_minutes,
            )?,
        };

        Ok(Self {
            environment,
            server,
            app,
            auth,
            frontend,
            storage,
            mail,
        })
    }

    /// Reject development secrets when running in production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.environment.is_production() {
            return Ok(());
        }
        if self.auth.uses_default_secret() {
            return Err(ConfigError::MissingSecret {
                key: "JWT_SECRET".to_string(),
            });
        }
        if self.app.uses_default_key() {
            return Err(ConfigError::MissingSecret {
                key: "APP_KEY".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
