use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::Value;

use crate::dto::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::handlers::{response, ApiError};
use crate::i18n::{request_language, success_message};
use crate::state::AppState;
use crate::validation::Validated;

/// Handler for POST /api/auth/forgot-password
///
/// Queues an email with a link to `{FRONTEND_URL}/reset-password`.
pub async fn forgot_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Validated<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let email = body.into_inner().email.unwrap_or_default();
    state.auth.send_password_reset(&email, Utc::now()).await?;
    Ok(response::success(Value::Null, Some(success_message("reset_link_sent", lang))))
}

/// Handler for POST /api/auth/reset-password
///
/// An unknown, wrong or expired token is a validation failure on `email`.
pub async fn reset_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Validated<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let request = body.into_inner();
    state
        .auth
        .reset_password(
            request.email.as_deref().unwrap_or_default(),
            request.token.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
            Utc::now(),
        )
        .await?;
    Ok(response::success(Value::Null, Some(success_message("password_reset", lang))))
}
