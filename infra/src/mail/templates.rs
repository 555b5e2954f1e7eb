//! Localized mail templates

use tm_core::services::{MailJob, MailKind};
use tm_shared::Language;

use super::transport::OutboundEmail;

/// Sender identity and the lifetimes quoted in message bodies
#[derive(Debug, Clone)]
pub struct Sender {
    pub address: String,
    pub name: String,
    pub app_name: String,
    pub verification_expire_minutes: i64,
    pub password_reset_expire_minutes: i64,
}

/// Render a job into a message in the recipient's language
pub fn render(job: &MailJob, sender: &Sender) -> OutboundEmail {
    let (subject, body) = match &job.kind {
        MailKind::PasswordReset { url } => password_reset(job, sender, url),
        MailKind::EmailVerification { url } => email_verification(job, sender, url),
    };
    OutboundEmail {
        from_address: sender.address.clone(),
        from_name: sender.name.clone(),
        to: job.to.clone(),
        subject,
        body,
    }
}

fn password_reset(job: &MailJob, sender: &Sender, url: &str) -> (String, String) {
    let minutes = sender.password_reset_expire_minutes;
    match job.language {
        Language::Spanish => (
            format!("{}: restablecer contraseña", sender.app_name),
            format!(
                "Hola {},\n\n\
                 Recibimos una solicitud para restablecer la contraseña de tu cuenta.\n\
                 Usa el siguiente enlace para elegir una nueva:\n\n{}\n\n\
                 El enlace caduca en {} minutos. Si no solicitaste el cambio, ignora este mensaje.\n\n\
                 {}",
                job.recipient_name, url, minutes, sender.app_name
            ),
        ),
        Language::English => (
            format!("{}: reset your password", sender.app_name),
            format!(
                "Hello {},\n\n\
                 We received a request to reset the password for your account.\n\
                 Use the link below to choose a new one:\n\n{}\n\n\
                 The link expires in {} minutes. If you did not ask for this, ignore this message.\n\n\
                 {}",
                job.recipient_name, url, minutes, sender.app_name
            ),
        ),
    }
}

fn email_verification(job: &MailJob, sender: &Sender, url: &str) -> (String, String) {
    let minutes = sender.verification_expire_minutes;
    match job.language {
        Language::Spanish => (
            format!("{}: verifica tu correo electrónico", sender.app_name),
            format!(
                "Hola {},\n\n\
                 Gracias por registrarte. Confirma tu dirección de correo con este enlace:\n\n{}\n\n\
                 El enlace caduca en {} minutos.\n\n\
                 {}",
                job.recipient_name, url, minutes, sender.app_name
            ),
        ),
        Language::English => (
            format!("{}: verify your email address", sender.app_name),
            format!(
                "Hello {},\n\n\
                 Thanks for signing up. Confirm your email address with this link:\n\n{}\n\n\
                 The link expires in {} minutes.\n\n\
                 {}",
                job.recipient_name, url, minutes, sender.app_name
            ),
        ),
    }
}
