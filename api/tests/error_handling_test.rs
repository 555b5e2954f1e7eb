//! Mapping of failures onto the error envelope

#[macro_use]
mod common;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::{json, Value};
use tm_core::services::InMemoryMailQueue;

use common::*;

#[actix_web::test]
async fn test_missing_token_renders_spanish_envelope() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = get("/api/auth/me")
        .insert_header((header::ACCEPT_LANGUAGE, "es-PE,es;q=0.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "No autenticado o token inválido."}));
}

#[actix_web::test]
async fn test_missing_token_renders_english_envelope() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = get("/api/auth/me")
        .insert_header((header::ACCEPT_LANGUAGE, "en-US"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Not authenticated or invalid token."}));
}

#[actix_web::test]
async fn test_xhr_request_gets_envelope_without_accept_header() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(("X-Requested-With", "XMLHttpRequest"))
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Not authenticated or invalid token."));
}

#[actix_web::test]
async fn test_non_json_request_keeps_framework_rendering() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Not found: route");
}

#[actix_web::test]
async fn test_non_json_authentication_failure_keeps_plain_rendering() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Unauthenticated");
}

#[actix_web::test]
async fn test_authenticated_route_with_and_without_token() {
    let ctx = TestContext::new();
    let ana = ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = get("/api/auth/me").insert_header(ctx.bearer(&ana)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], json!("ana@example.com"));

    let resp = test::call_service(&app, get("/api/auth/me").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Not authenticated or invalid token."}));

    let req = get(&format!("/api/users/{}", ana.id)).insert_header(ctx.bearer(&ana)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, get(&format!("/api/users/{}", ana.id)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_forbidden_envelope() {
    let ctx = TestContext::new();
    let tourist = ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = get("/api/admin/dashboard").insert_header(ctx.bearer(&tourist)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": false, "message": "You do not have permission to perform this action."})
    );
}

#[actix_web::test]
async fn test_unknown_route_and_missing_entity_share_not_found() {
    let ctx = TestContext::new();
    let admin = ctx.seed_user("Admin", "admin@example.com", &["admin"]);
    let app = init_app!(ctx);

    for uri in ["/api/unknown", "/api/users/999", "/api/users/abc"] {
        let req = get(uri).insert_header(ctx.bearer(&admin)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "message": "Resource not found."}), "{}", uri);
    }
}

#[actix_web::test]
async fn test_malformed_json_is_a_validation_failure() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Validation error"));
    assert_eq!(body["errors"]["body"][0], json!("The request body must be valid JSON."));
}

fn registration() -> Value {
    json!({
        "name": "Ana Quispe",
        "email": "ana@example.com",
        "password": PASSWORD,
        "password_confirmation": PASSWORD
    })
}

#[actix_web::test]
async fn test_internal_failure_shows_detail_in_debug() {
    let ctx = TestContext::with_mailer(true, InMemoryMailQueue::rejecting());
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": false, "message": "Internal server error: mail queue is not accepting jobs"})
    );
}

#[actix_web::test]
async fn test_internal_failure_hides_detail_outside_debug() {
    let ctx = TestContext::with_mailer(false, InMemoryMailQueue::rejecting());
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Internal server error"}));
}

#[actix_web::test]
async fn test_health_check_is_public() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, get("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
}
