use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use tm_core::services::AuthService;

use crate::dto::{AuthPayload, LoginRequest};
use crate::handlers::{response, ApiError};
use crate::i18n::{request_language, success_message};
use crate::resources::to_view;
use crate::state::AppState;
use crate::validation::Validated;

/// Handler for POST /api/auth/login
///
/// Wrong credentials are an authentication failure, whichever of the two
/// was wrong.
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Validated<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let LoginRequest { email, password } = body.into_inner();
    let (user, token) = state
        .auth
        .login(
            email.as_deref().unwrap_or_default(),
            password.as_deref().unwrap_or_default(),
            Utc::now(),
        )
        .await?;

    let payload = AuthPayload {
        user: to_view(&user, &AuthService::session_relations(), state.storage.as_ref()),
        token,
    };
    Ok(response::success(payload, Some(success_message("logged_in", lang))))
}
