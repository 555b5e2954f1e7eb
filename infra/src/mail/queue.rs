//! Bounded channel feeding the mail worker

use tokio::sync::mpsc::{self, error::TrySendError};
use tm_core::errors::{DomainError, DomainResult};
use tm_core::services::{MailJob, MailQueue};

/// Sending half of the mail channel
///
/// `enqueue` never waits: a full or closed channel is reported immediately.
#[derive(Clone)]
pub struct TokioMailQueue {
    sender: mpsc::Sender<MailJob>,
}

impl TokioMailQueue {
    /// Create a queue and the receiver a worker should drain
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<MailJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl MailQueue for TokioMailQueue {
    fn enqueue(&self, job: MailJob) -> DomainResult<()> {
        let kind = job.kind_name();
        match self.sender.try_send(job) {
            Ok(()) => {
                tracing::debug!(kind, "Mail job queued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                tracing::error!(kind, "Mail queue is full");
                Err(DomainError::internal("mail queue is full"))
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!(kind, "Mail worker has stopped");
                Err(DomainError::internal("mail queue is closed"))
            }
        }
    }
}
