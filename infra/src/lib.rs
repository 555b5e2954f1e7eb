//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core layer only
//! describes through traits.
//!
//! - **Mail**: bounded queue drained by a tokio worker, localized templates
//!   and delivery transports
//! - **Storage**: public URL resolution for stored files

pub mod mail;
pub mod storage;

pub use mail::{spawn_mail_worker, LogMailTransport, MailError, MailTransport, OutboundEmail, TokioMailQueue};
pub use storage::PublicStorage;
