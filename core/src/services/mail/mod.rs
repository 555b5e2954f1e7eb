//! Transactional mail: job descriptions, the queue seam and front-end links.
//!
//! Handlers only enqueue; delivery happens on a worker owned by the
//! infrastructure layer.

mod job;
mod links;
mod queue;

pub use job::{MailJob, MailKind};
pub use links::{email_hash, LinkBuilder, VerificationParams};
pub use queue::{InMemoryMailQueue, MailQueue};
