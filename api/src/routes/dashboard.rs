use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::handlers::{response, ApiError};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/admin/dashboard
pub async fn dashboard(auth: AuthContext, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    let summary = state.dashboard.summary(Utc::now()).await?;
    Ok(response::success(summary, None))
}
