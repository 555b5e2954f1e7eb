//! Outbound message jobs

use serde::{Deserialize, Serialize};
use tm_shared::Language;

/// Which template to render, with the link it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MailKind {
    PasswordReset { url: String },
    EmailVerification { url: String },
}

/// A message waiting to be rendered and sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailJob {
    pub to: String,
    pub recipient_name: String,
    pub language: Language,
    pub kind: MailKind,
}

impl MailJob {
    pub fn password_reset(to: impl Into<String>, recipient_name: impl Into<String>, language: Language, url: String) -> Self {
        Self {
            to: to.into(),
            recipient_name: recipient_name.into(),
            language,
            kind: MailKind::PasswordReset { url },
        }
    }

    pub fn email_verification(
        to: impl Into<String>,
        recipient_name: impl Into<String>,
        language: Language,
        url: String,
    ) -> Self {
        Self {
            to: to.into(),
            recipient_name: recipient_name.into(),
            language,
            kind: MailKind::EmailVerification { url },
        }
    }

    /// Short label for logs
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MailKind::PasswordReset { .. } => "password_reset",
            MailKind::EmailVerification { .. } => "email_verification",
        }
    }

    /// The link embedded in the message
    pub fn url(&self) -> &str {
        match &self.kind {
            MailKind::PasswordReset { url } | MailKind::EmailVerification { url } => url,
        }
    }
}
