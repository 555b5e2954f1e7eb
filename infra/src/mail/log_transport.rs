//! Log-only mail transport
//!
//! Writes each message to the log instead of delivering it and remembers what
//! was "sent", which makes it the transport for development and tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tm_shared::utils::mask_email;
use tracing::{info, warn};
use uuid::Uuid;

use super::transport::{MailTransport, OutboundEmail};
use super::MailError;

#[derive(Clone, Default)]
pub struct LogMailTransport {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    simulate_failure: bool,
}

impl LogMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            simulate_failure: true,
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        if !email.to.contains('@') {
            return Err(MailError::InvalidAddress(mask_email(&email.to)));
        }

        if self.simulate_failure {
            warn!(to = %mask_email(&email.to), "Log mail transport simulating failure");
            return Err(MailError::Transport("Simulated mail delivery failure".to_string()));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        info!(
            target: "mail_service",
            provider = "log",
            to = %mask_email(&email.to),
            subject = %email.subject,
            message_id = %message_id,
            "Mail delivered to log"
        );
        tracing::debug!(target: "mail_service", body = %email.body, "Mail body");

        self.sent
            .lock()
            .map_err(|_| MailError::Transport("sent-mail log lock poisoned".to_string()))?
            .push(email.clone());
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Log"
    }
}
