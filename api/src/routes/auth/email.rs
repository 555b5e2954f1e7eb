use actix_web::{error::QueryPayloadError, web, Error, HttpRequest, HttpResponse};
use chrono::Utc;

use crate::dto::{VerificationStatus, VerifyEmailQuery};
use crate::handlers::{response, ApiError};
use crate::i18n::{request_language, success_message};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Query extraction for verification links: missing or malformed
/// parameters make the link invalid, an authorization failure
pub fn verification_query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| -> Error {
        log::debug!("Malformed verification link: {}", err);
        ApiError::Forbidden.into()
    })
}

/// Handler for GET /api/auth/email/verify
///
/// The front end forwards the query string of the emailed link unchanged.
pub async fn verify_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<VerifyEmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let newly_verified = state.auth.verify_email(&query, Utc::now()).await?;
    let message = if newly_verified {
        "email_verified"
    } else {
        "email_already_verified"
    };
    Ok(response::success(
        VerificationStatus { email_verified: true },
        Some(success_message(message, lang)),
    ))
}

/// Handler for POST /api/auth/email/resend
pub async fn resend_verification(
    req: HttpRequest,
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let sent = state.auth.resend_verification(auth.user_id, Utc::now()).await?;
    let message = if sent {
        "verification_sent"
    } else {
        "email_already_verified"
    };
    Ok(response::success(
        VerificationStatus { email_verified: !sent },
        Some(success_message(message, lang)),
    ))
}
