//! Application factory
//!
//! Builds the actix-web application from already-initialized state so the
//! binary and the integration tests run the exact same pipeline.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use std::sync::Arc;

use crate::handlers::error::ExceptionMapper;
use crate::middleware::{cors::create_cors, error_handler::ErrorHandlerMiddleware};
use crate::routes;
use crate::state::AppState;
use tm_shared::AppConfig;

/// Create the application with all routes and middleware
///
/// Middleware order, outermost first: access log, CORS, error rendering.
/// Error rendering sits inside CORS so envelopes still carry CORS headers.
pub fn create_app(
    config: &AppConfig,
    state: web::Data<AppState>,
    mapper: Arc<ExceptionMapper>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(ErrorHandlerMiddleware::new(mapper))
        .wrap(create_cors(config))
        .wrap(Logger::default())
        .configure(routes::configure)
        .default_service(web::to(routes::not_found))
}
