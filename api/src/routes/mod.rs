//! Routing table

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod users;

use actix_web::web;

use crate::handlers::ApiError;
use crate::middleware::auth::JwtAuth;

/// Register every `/api` route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register::register))
                    .route("/login", web::post().to(auth::login::login))
                    .route("/forgot-password", web::post().to(auth::password::forgot_password))
                    .route("/reset-password", web::post().to(auth::password::reset_password))
                    .service(
                        web::resource("/email/verify")
                            .app_data(auth::email::verification_query_config())
                            .route(web::get().to(auth::email::verify_email)),
                    )
                    .service(
                        web::resource("/email/resend")
                            .wrap(JwtAuth::new())
                            .route(web::post().to(auth::email::resend_verification)),
                    )
                    .service(
                        web::resource("/me")
                            .wrap(JwtAuth::new())
                            .route(web::get().to(auth::me::me)),
                    ),
            )
            .service(
                web::scope("/users")
                    .app_data(users::include_query_config())
                    .wrap(JwtAuth::new())
                    .route("", web::get().to(users::list_users))
                    .route("/{id}", web::get().to(users::show_user))
                    .route("/{id}", web::put().to(users::update_user)),
            )
            .service(
                web::scope("/admin")
                    .wrap(JwtAuth::new())
                    .route("/dashboard", web::get().to(dashboard::dashboard)),
            ),
    );
}

/// Fallback for unmatched routes; shares the not-found category with
/// missing entities
pub async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound("route".to_string()))
}
