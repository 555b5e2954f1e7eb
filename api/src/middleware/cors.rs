//! CORS middleware configuration for cross-origin requests.
//!
//! The web front end is served from its own origin, so the API must answer
//! its preflight requests. Development is permissive; production only admits
//! the configured front-end origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tm_shared::AppConfig;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the current environment.
pub fn create_cors(config: &AppConfig) -> Cors {
    if config.is_production() {
        create_production_cors(&config.frontend.url)
    } else {
        create_development_cors()
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ]
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
        header::CONTENT_TYPE,
        header::HeaderName::from_static("x-requested-with"),
    ]
}

fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .max_age(MAX_AGE)
        .supports_credentials()
}

fn create_production_cors(frontend_url: &str) -> Cors {
    let origin = frontend_url.trim_end_matches('/');
    log::info!("Configuring CORS for production, allowed origin: {}", origin);

    Cors::default()
        .allowed_origin(origin)
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .max_age(MAX_AGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use tm_shared::{Environment, FrontendConfig};

    fn production_config() -> AppConfig {
        AppConfig {
            environment: Environment::Production,
            frontend: FrontendConfig {
                url: "https://turismo.example.com/".to_string(),
            },
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_production_allows_frontend_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&production_config()))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://turismo.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://turismo.example.com"
        );
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&AppConfig::default()))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
