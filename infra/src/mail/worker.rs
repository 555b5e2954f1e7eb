//! Mail worker draining the queue

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tm_core::services::MailJob;
use tm_shared::config::MailConfig;
use tm_shared::utils::mask_email;

use super::queue::TokioMailQueue;
use super::templates::{render, Sender};
use super::transport::MailTransport;

/// Spawn the worker on the current tokio runtime.
///
/// The worker exits once every clone of the returned queue is dropped and the
/// channel is drained. Delivery failures are logged and the job is dropped.
pub fn spawn_mail_worker(
    transport: Arc<dyn MailTransport>,
    config: &MailConfig,
    app_name: &str,
) -> (TokioMailQueue, JoinHandle<()>) {
    let (queue, receiver) = TokioMailQueue::channel(config.queue_capacity);
    let sender = Sender {
        address: config.from_address.clone(),
        name: config.from_name.clone(),
        app_name: app_name.to_string(),
        verification_expire_minutes: config.verification_expire_minutes,
        password_reset_expire_minutes: config.password_reset_expire_minutes,
    };
    let handle = tokio::spawn(run(receiver, transport, sender));
    (queue, handle)
}

async fn run(mut receiver: mpsc::Receiver<MailJob>, transport: Arc<dyn MailTransport>, sender: Sender) {
    tracing::info!(provider = transport.provider_name(), "Mail worker started");

    while let Some(job) = receiver.recv().await {
        let email = render(&job, &sender);
        match transport.send(&email).await {
            Ok(message_id) => tracing::info!(
                kind = job.kind_name(),
                to = %mask_email(&job.to),
                message_id = %message_id,
                "Mail sent"
            ),
            Err(e) => tracing::error!(
                kind = job.kind_name(),
                to = %mask_email(&job.to),
                error = %e,
                "Mail delivery failed"
            ),
        }
    }

    tracing::info!("Mail worker stopped");
}
