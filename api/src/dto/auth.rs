use serde::{Deserialize, Serialize};
use tm_core::domain::value_objects::IssuedToken;
use tm_core::services::{Registration, VerificationParams};
use validator::Validate;

use crate::resources::UserView;
use crate::validation::FormRequest;

/// Language codes accepted for `preferred_language`
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "es"];

/// `(field, "confirmed")` when the confirmation does not match
fn confirmation_rule(
    field: &'static str,
    value: &Option<String>,
    confirmation: &Option<String>,
) -> Option<(&'static str, &'static str)> {
    match value {
        Some(value) if confirmation.as_deref() != Some(value.as_str()) => Some((field, "confirmed")),
        _ => None,
    }
}

pub(crate) fn language_rule(value: &Option<String>) -> Option<(&'static str, &'static str)> {
    match value {
        Some(code) if !SUPPORTED_LANGUAGES.contains(&code.as_str()) => Some(("preferred_language", "in")),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1, max = 255, code = "between"))]
    pub name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 8, code = "min"))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[validate(length(max = 20, code = "max"))]
    pub phone: Option<String>,
    pub preferred_language: Option<String>,
}

impl FormRequest for RegisterRequest {
    fn after_validation(&self) -> Vec<(&'static str, &'static str)> {
        confirmation_rule("password", &self.password, &self.password_confirmation)
            .into_iter()
            .chain(language_rule(&self.preferred_language))
            .collect()
    }
}

impl RegisterRequest {
    pub fn into_registration(self) -> Registration {
        Registration {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            phone: self.phone,
            preferred_language: self.preferred_language.and_then(|code| code.parse().ok()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required)]
    pub password: Option<String>,
}

impl FormRequest for LoginRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(required, email)]
    pub email: Option<String>,
}

impl FormRequest for ForgotPasswordRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(required)]
    pub token: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 8, code = "min"))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl FormRequest for ResetPasswordRequest {
    fn after_validation(&self) -> Vec<(&'static str, &'static str)> {
        confirmation_rule("password", &self.password, &self.password_confirmation)
            .into_iter()
            .collect()
    }
}

/// Query string of a verification link
pub type VerifyEmailQuery = VerificationParams;

/// Payload returned by register and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub user: UserView,
    pub token: IssuedToken,
}

/// Payload returned by the email verification endpoints
#[derive(Debug, Clone, Serialize)]
pub struct VerificationStatus {
    pub email_verified: bool,
}
