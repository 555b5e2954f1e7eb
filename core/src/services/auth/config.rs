//! Configuration for the authentication service

use tm_shared::config::MailConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minutes a password-reset token stays valid
    pub password_reset_ttl_minutes: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            password_reset_ttl_minutes: 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthServiceConfig {
    pub fn from_mail_config(mail: &MailConfig) -> Self {
        Self {
            password_reset_ttl_minutes: mail.password_reset_expire_minutes,
            ..Self::default()
        }
    }
}
