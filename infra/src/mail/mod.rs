//! Mail Delivery Module
//!
//! Handlers enqueue [`MailJob`](tm_core::services::MailJob)s on a bounded
//! channel; a single worker renders each job with the localized templates and
//! hands the message to a [`MailTransport`].
//!
//! ## Features
//!
//! - **Queue**: `TokioMailQueue`, the core `MailQueue` backed by `tokio::sync::mpsc`
//! - **Worker**: logs delivery failures without retrying
//! - **Templates**: English and Spanish subjects and bodies
//! - **Log transport**: writes messages to the log instead of sending them

mod log_transport;
mod queue;
mod templates;
mod transport;
mod worker;

pub use log_transport::LogMailTransport;
pub use queue::TokioMailQueue;
pub use templates::{render, Sender};
pub use transport::{MailTransport, OutboundEmail};
pub use worker::spawn_mail_worker;

/// Mail delivery failures
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Mail transport error: {0}")]
    Transport(String),
}
