use actix_web::{web, HttpResponse};
use tm_core::domain::relations::RelationSet;

use crate::handlers::{response, ApiError};
use crate::middleware::auth::AuthContext;
use crate::resources::to_view;
use crate::state::AppState;

/// Handler for GET /api/auth/me: the caller with every relation loaded
pub async fn me(auth: AuthContext, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let relations = RelationSet::all();
    let user = state.auth.current_user(auth.user_id, &relations).await?;
    Ok(response::success(to_view(&user, &relations, state.storage.as_ref()), None))
}
