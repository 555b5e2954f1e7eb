//! Queue seam between handlers and the mail worker

use std::sync::Mutex;

use crate::errors::{DomainError, DomainResult};

use super::MailJob;

/// Fire-and-forget mail queue
///
/// `enqueue` must not wait for delivery; it fails only when the job cannot be
/// accepted (queue full or worker gone).
pub trait MailQueue: Send + Sync {
    fn enqueue(&self, job: MailJob) -> DomainResult<()>;
}

/// Queue that records jobs instead of delivering them
#[derive(Default)]
pub struct InMemoryMailQueue {
    jobs: Mutex<Vec<MailJob>>,
    rejecting: bool,
}

impl InMemoryMailQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that refuses every job, as a full or closed queue would
    pub fn rejecting() -> Self {
        Self {
            jobs: Mutex::default(),
            rejecting: true,
        }
    }

    /// Jobs accepted so far, in enqueue order
    pub fn jobs(&self) -> Vec<MailJob> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }
}

impl MailQueue for InMemoryMailQueue {
    fn enqueue(&self, job: MailJob) -> DomainResult<()> {
        if self.rejecting {
            return Err(DomainError::internal("mail queue is not accepting jobs"));
        }
        self.jobs
            .lock()
            .map_err(|_| DomainError::internal("mail queue lock poisoned"))?
            .push(job);
        Ok(())
    }
}
