//! User administration and profile endpoints

use actix_web::{error::QueryPayloadError, web, Error, HttpRequest, HttpResponse};
use tm_core::domain::relations::{Relation, RelationSet};

use crate::dto::{IncludeQuery, UpdateUserRequest};
use crate::handlers::{response, ApiError};
use crate::i18n::{request_language, success_message};
use crate::middleware::auth::AuthContext;
use crate::resources::{to_view, to_views};
use crate::state::AppState;
use crate::validation::Validated;

/// Permission granting read access to every account
pub const VIEW_USERS_PERMISSION: &str = "users.view";

/// Query extraction for `?include=`: a query string that does not parse is
/// a validation failure on `include`
pub fn include_query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| -> Error {
        log::debug!("Malformed include query: {}", err);
        invalid_include().into()
    })
}

fn invalid_include() -> ApiError {
    ApiError::FieldRule {
        field: "include".to_string(),
        rule: "include".to_string(),
    }
}

/// Relations requested through `?include=`; every relation when absent
fn requested_relations(query: &IncludeQuery) -> Result<RelationSet, ApiError> {
    match query.include.as_deref() {
        None => Ok(RelationSet::all()),
        Some(list) => RelationSet::parse_list(list).map_err(|e| {
            log::debug!("Rejected include list {:?}: {}", list, e);
            invalid_include()
        }),
    }
}

/// Handler for GET /api/users
pub async fn list_users(auth: AuthContext, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    auth.require_admin_or(VIEW_USERS_PERMISSION)?;

    let relations = RelationSet::none().with(Relation::Roles);
    let users = state.users.list(&relations).await?;
    Ok(response::success(to_views(&users, &relations, state.storage.as_ref()), None))
}

/// Handler for GET /api/users/{id}
///
/// Callers may read their own account; reading others needs the admin role
/// or the `users.view` permission. `?include=roles,emprendimientos` narrows
/// the loaded relations.
pub async fn show_user(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<IncludeQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if auth.user_id != id {
        auth.require_admin_or(VIEW_USERS_PERMISSION)?;
    }

    let relations = requested_relations(&query)?;
    let user = state.users.get(id, &relations).await?;
    Ok(response::success(to_view(&user, &relations, state.storage.as_ref()), None))
}

/// Handler for PUT /api/users/{id}
///
/// Who may submit is decided by [`UpdateUserRequest`]'s authorization.
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: Validated<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let lang = request_language(&req);
    let relations = RelationSet::all();
    let user = state
        .users
        .update_profile(path.into_inner(), body.into_inner().into_update(), &relations)
        .await?;
    Ok(response::success(
        to_view(&user, &relations, state.storage.as_ref()),
        Some(success_message("profile_updated", lang)),
    ))
}
