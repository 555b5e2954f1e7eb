//! Mail transport interface

use async_trait::async_trait;
use serde::Serialize;

use super::MailError;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from_address: String,
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery backend for rendered messages
///
/// Implementations include the log transport used in development and tests.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a message, returning the provider's message id
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;
}
