//! Account lifecycle through the HTTP surface

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use tm_core::services::MailKind;

use common::*;

fn registration(email: &str) -> Value {
    json!({
        "name": "Ana Quispe",
        "email": email,
        "password": PASSWORD,
        "password_confirmation": PASSWORD,
        "preferred_language": "es"
    })
}

#[actix_web::test]
async fn test_register_without_email_lists_the_field() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/register")
        .set_json(json!({"name": "Ana", "password": PASSWORD, "password_confirmation": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation error"));
    let messages = body["errors"]["email"].as_array().unwrap();
    assert!(!messages.is_empty());
    assert_eq!(messages[0], json!("The email field is required."));
}

#[actix_web::test]
async fn test_register_creates_tourist_and_queues_verification() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration("ana@example.com")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["message"],
        json!("User registered successfully. Please verify your email.")
    );
    assert_eq!(body["data"]["user"]["roles"], json!(["turista"]));
    assert_eq!(body["data"]["user"]["email_verified"], json!(false));
    assert_eq!(body["data"]["user"]["preferred_language"], json!("es"));
    assert_eq!(body["data"]["token"]["token_type"], json!("Bearer"));
    assert!(body["data"]["token"]["access_token"].as_str().unwrap().len() > 20);

    let jobs = ctx.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].to, "ana@example.com");
    assert!(matches!(jobs[0].kind, MailKind::EmailVerification { .. }));
}

#[actix_web::test]
async fn test_register_with_taken_email() {
    let ctx = TestContext::new();
    ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration("ana@example.com")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"], json!(["The email has already been taken."]));
}

#[actix_web::test]
async fn test_verification_link_round_trip() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration("ana@example.com")).to_request();
    test::call_service(&app, req).await;
    let link = ctx.jobs()[0].url().to_string();
    assert!(link.starts_with("https://turismo.example.com/verify-email?"));

    let uri = format!("/api/auth/email/verify?{}", link_query(&link));

    let resp = test::call_service(&app, get(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Email verified successfully."));
    assert_eq!(body["data"], json!({"email_verified": true}));

    let resp = test::call_service(&app, get(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Email already verified."));
}

#[actix_web::test]
async fn test_verification_link_with_bad_signature() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/register").set_json(registration("ana@example.com")).to_request();
    test::call_service(&app, req).await;
    let link = ctx.jobs()[0].url().to_string();

    let uri = format!(
        "/api/auth/email/verify?id={}&hash={}&expires={}&signature=deadbeef",
        link_param(&link, "id"),
        link_param(&link, "hash"),
        link_param(&link, "expires"),
    );
    let resp = test::call_service(&app, get(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, get("/api/auth/email/verify?id=1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_login_and_current_user() {
    let ctx = TestContext::new();
    ctx.seed_user("Ana", "ana@example.com", &["emprendedor"]);
    let app = init_app!(ctx);

    let req = post("/api/auth/login")
        .set_json(json!({"email": "ana@example.com", "password": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Login successful."));
    assert!(body["data"]["user"]["last_login_at"].is_string());
    let token = body["data"]["token"]["access_token"].as_str().unwrap().to_string();

    let req = get("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let user = &body["data"];
    assert_eq!(user["email"], json!("ana@example.com"));
    assert_eq!(user["roles"], json!(["emprendedor"]));
    assert_eq!(user["is_entrepreneur"], json!(false));
    assert_eq!(user["emprendimientos_count"], json!(0));
    assert_eq!(user["roles_info"][0]["permissions_count"], json!(2));
    assert_eq!(user["has_permissions"], json!(true));
}

#[actix_web::test]
async fn test_login_with_wrong_password() {
    let ctx = TestContext::new();
    ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = post("/api/auth/login")
        .set_json(json!({"email": "ana@example.com", "password": "incorrecta"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Not authenticated or invalid token."}));
}

#[actix_web::test]
async fn test_forgot_password_for_unknown_email() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/forgot-password")
        .set_json(json!({"email": "nadie@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"], json!(["We can't find a user with that email."]));
    assert!(ctx.jobs().is_empty());
}

#[actix_web::test]
async fn test_password_reset_round_trip() {
    let ctx = TestContext::new();
    ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = post("/api/auth/forgot-password")
        .set_json(json!({"email": "ana@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["message"], json!("We have emailed your password reset link."));

    let link = ctx.jobs()[0].url().to_string();
    assert!(link.starts_with("https://turismo.example.com/reset-password?"));
    let reset = json!({
        "token": link_param(&link, "token"),
        "email": link_param(&link, "email"),
        "password": "nueva-clave-1",
        "password_confirmation": "nueva-clave-1"
    });

    let req = post("/api/auth/reset-password").set_json(reset.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Your password has been reset."));

    let req = post("/api/auth/reset-password").set_json(reset).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"], json!(["This password reset token is invalid."]));

    let req = post("/api/auth/login")
        .set_json(json!({"email": "ana@example.com", "password": "nueva-clave-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_requires_matching_confirmation() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = post("/api/auth/reset-password")
        .set_json(json!({
            "token": "abc",
            "email": "ana@example.com",
            "password": "nueva-clave-1",
            "password_confirmation": "otra-clave-1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["password"], json!(["The password confirmation does not match."]));
}

#[actix_web::test]
async fn test_resend_verification() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("Ana", "ana@example.com", &["turista"]);
    let app = init_app!(ctx);

    let req = post("/api/auth/email/resend").insert_header(ctx.bearer(&user)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("A new verification link has been sent to your email address.")
    );
    assert_eq!(body["data"], json!({"email_verified": false}));
    assert_eq!(ctx.jobs().len(), 1);
}
