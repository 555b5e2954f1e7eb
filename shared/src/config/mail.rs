//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

/// Mail queue and link settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sender address
    pub from_address: String,

    /// Sender display name
    pub from_name: String,

    /// Maximum number of queued, undelivered messages
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Lifetime of signed email-verification links, in minutes
    #[serde(default = "default_expire_minutes")]
    pub verification_expire_minutes: i64,

    /// Lifetime of password-reset tokens, in minutes
    #[serde(default = "default_expire_minutes")]
    pub password_reset_expire_minutes: i64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: String::from("no-reply@turismo.local"),
            from_name: String::from("Turismo"),
            queue_capacity: default_queue_capacity(),
            verification_expire_minutes: default_expire_minutes(),
            password_reset_expire_minutes: default_expire_minutes(),
        }
    }
}

fn default_queue_capacity() -> usize {
    256
}

fn default_expire_minutes() -> i64 {
    60
}
