use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use tm_core::services::AuthService;

use crate::dto::{AuthPayload, RegisterRequest};
use crate::handlers::{response, ApiError};
use crate::i18n::{request_language, success_message};
use crate::resources::to_view;
use crate::state::AppState;
use crate::validation::Validated;

/// Handler for POST /api/auth/register
///
/// Creates an account with the default role and queues its verification
/// email. The response does not wait for the email to be sent.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ana Quispe",
///     "email": "ana@example.com",
///     "password": "secreto123",
///     "password_confirmation": "secreto123",
///     "phone": "+51 987 654 321",
///     "preferred_language": "es"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{user, token}`; a taken email is a validation
/// failure on `email`.
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Validated<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let (user, token) = state
        .auth
        .register(body.into_inner().into_registration(), Utc::now())
        .await?;

    let payload = AuthPayload {
        user: to_view(&user, &AuthService::session_relations(), state.storage.as_ref()),
        token,
    };
    Ok(response::created(payload, Some(success_message("registered", lang))))
}
