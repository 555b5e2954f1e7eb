//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts bearer tokens from the Authorization header,
//! verifies them with the token service held in the application state, and
//! injects an [`AuthContext`] into the request. Every failure is an
//! authentication failure; rendering is left to the error-handling middleware.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use tm_core::domain::entities::role::ADMIN_ROLE;
use tm_core::domain::entities::token::Claims;

use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, as carried by the verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: u64,
    pub email: String,
    pub roles: Vec<String>,
    /// Effective permissions, direct and inherited
    pub permissions: Vec<String>,
}

impl AuthContext {
    /// Creates a context from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, ApiError> {
        let user_id = claims.user_id().ok_or(ApiError::Unauthenticated)?;
        Ok(Self {
            user_id,
            email: claims.email,
            roles: claims.roles,
            permissions: claims.permissions,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|granted| granted == permission)
    }

    /// Whether the caller is the given user or an admin
    pub fn is_self_or_admin(&self, user_id: u64) -> bool {
        self.user_id == user_id || self.is_admin()
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// Admins pass, as does anyone holding `permission`
    pub fn require_admin_or(&self, permission: &str) -> Result<(), ApiError> {
        if self.is_admin() || self.has_permission(permission) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // rejections leave as responses carrying the error, never as `Err`
        let context = match authenticate(&req) {
            Ok(context) => context,
            Err(err) => {
                let res = req.error_response(err).map_into_right_body();
                return Box::pin(ready(Ok::<_, Error>(res)));
            }
        };

        req.extensions_mut().insert(context);
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Verify the bearer token of a request
fn authenticate(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        log::debug!("Missing or malformed Authorization header on {}", req.path());
        ApiError::Unauthenticated
    })?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("authentication is not configured".to_string()))?;
    let claims = state.auth.tokens().verify(&token).map_err(ApiError::from)?;
    AuthContext::from_claims(claims)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or(ApiError::Unauthenticated);

        ready(result)
    }
}
