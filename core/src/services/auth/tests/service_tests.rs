//! Unit tests for authentication service

use std::sync::Arc;

use chrono::{Duration, Utc};
use tm_shared::config::AuthConfig;
use tm_shared::Language;
use url::Url;

use crate::domain::entities::role::{Permission, Role};
use crate::domain::relations::RelationSet;
use crate::errors::DomainError;
use crate::repositories::{
    InMemoryPasswordResetRepository, InMemoryUserRepository, PasswordResetRecord, PasswordResetRepository,
    UserRepository,
};
use crate::services::auth::{hash_token, AuthService, AuthServiceConfig, Registration, RESET_TOKEN_LENGTH};
use crate::services::mail::{InMemoryMailQueue, LinkBuilder, MailKind, VerificationParams};
use crate::services::token::TokenService;

struct Harness {
    service: AuthService,
    users: Arc<InMemoryUserRepository>,
    resets: Arc<InMemoryPasswordResetRepository>,
    mailer: Arc<InMemoryMailQueue>,
}

fn harness() -> Harness {
    harness_with_mailer(InMemoryMailQueue::new())
}

fn harness_with_mailer(mailer: InMemoryMailQueue) -> Harness {
    let users = Arc::new(InMemoryUserRepository::with_roles(vec![
        Role::new(1, "admin").with_permissions(vec![Permission::new(1, "users.view")]),
        Role::new(2, "turista").with_permissions(vec![Permission::new(2, "reservations.create")]),
    ]));
    let resets = Arc::new(InMemoryPasswordResetRepository::new());
    let mailer = Arc::new(mailer);
    let links = LinkBuilder::new("https://turismo.example.com", "app-key", 60).unwrap();
    let config = AuthServiceConfig {
        password_reset_ttl_minutes: 60,
        bcrypt_cost: 4,
    };
    let service = AuthService::new(
        users.clone(),
        resets.clone(),
        mailer.clone(),
        TokenService::new(&AuthConfig::new("secret")),
        links,
        config,
    );
    Harness {
        service,
        users,
        resets,
        mailer,
    }
}

fn registration(email: &str) -> Registration {
    Registration {
        name: "Ana Quispe".to_string(),
        email: email.to_string(),
        password: "secreto123".to_string(),
        phone: None,
        preferred_language: Some(Language::Spanish),
    }
}

fn query_param(link: &str, name: &str) -> String {
    Url::parse(link)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

fn verification_params(link: &str) -> VerificationParams {
    VerificationParams {
        id: query_param(link, "id").parse().unwrap(),
        hash: query_param(link, "hash"),
        expires: query_param(link, "expires").parse().unwrap(),
        signature: query_param(link, "signature"),
    }
}

#[tokio::test]
async fn test_register_assigns_default_role_and_queues_verification() {
    let h = harness();
    let (user, token) = h.service.register(registration("Ana@Example.com"), Utc::now()).await.unwrap();

    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role_names(), vec!["turista"]);
    assert_eq!(user.preferred_language, Language::Spanish);
    assert_ne!(user.password_hash, "secreto123");

    let claims = h.service.tokens().verify(&token.access_token).unwrap();
    assert_eq!(claims.user_id(), Some(user.id));
    assert_eq!(claims.permissions, vec!["reservations.create"]);

    let jobs = h.mailer.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].to, "ana@example.com");
    assert_eq!(jobs[0].language, Language::Spanish);
    assert!(matches!(jobs[0].kind, MailKind::EmailVerification { .. }));
    assert!(jobs[0].url().starts_with("https://turismo.example.com/verify-email?"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = harness();
    h.service.register(registration("ana@example.com"), Utc::now()).await.unwrap();
    let err = h
        .service
        .register(registration("ANA@example.com"), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::field_rule("email", "unique"));
}

#[tokio::test]
async fn test_register_fails_when_queue_rejects() {
    let h = harness_with_mailer(InMemoryMailQueue::rejecting());
    let result = h.service.register(registration("ana@example.com"), Utc::now()).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_login_success_records_login() {
    let h = harness();
    h.service.register(registration("ana@example.com"), Utc::now()).await.unwrap();

    let now = Utc::now();
    let (user, token) = h.service.login("ana@example.com", "secreto123", now).await.unwrap();
    assert_eq!(user.last_login_at, Some(now));
    assert_eq!(user.roles[0].permissions.len(), 1);
    assert_eq!(token.token_type, "Bearer");

    let stored = h.users.find_by_id(user.id, &RelationSet::none()).await.unwrap().unwrap();
    assert_eq!(stored.last_login_at, Some(now));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email() {
    let h = harness();
    h.service.register(registration("ana@example.com"), Utc::now()).await.unwrap();

    assert_eq!(
        h.service.login("ana@example.com", "incorrecta", Utc::now()).await.unwrap_err(),
        DomainError::Unauthenticated
    );
    assert_eq!(
        h.service.login("nadie@example.com", "secreto123", Utc::now()).await.unwrap_err(),
        DomainError::Unauthenticated
    );
}

#[tokio::test]
async fn test_password_reset_flow() {
    let h = harness();
    h.service.register(registration("ana@example.com"), Utc::now()).await.unwrap();

    let now = Utc::now();
    h.service.send_password_reset("ana@example.com", now).await.unwrap();

    let jobs = h.mailer.jobs();
    let job = jobs.last().unwrap();
    assert!(matches!(job.kind, MailKind::PasswordReset { .. }));
    let token = query_param(job.url(), "token");
    assert_eq!(token.len(), RESET_TOKEN_LENGTH);
    assert_eq!(query_param(job.url(), "email"), "ana@example.com");

    let stored = h.resets.find("ana@example.com").await.unwrap().unwrap();
    assert_eq!(stored.token_hash, hash_token(&token));

    h.service
        .reset_password("ana@example.com", &token, "nuevaClave456", now)
        .await
        .unwrap();
    assert!(h.service.login("ana@example.com", "nuevaClave456", now).await.is_ok());

    // Tokens are single use
    assert_eq!(
        h.service
            .reset_password("ana@example.com", &token, "otraClave789", now)
            .await
            .unwrap_err(),
        DomainError::field_rule("email", "reset_token")
    );
}

#[tokio::test]
async fn test_password_reset_unknown_email() {
    let h = harness();
    assert_eq!(
        h.service.send_password_reset("nadie@example.com", Utc::now()).await.unwrap_err(),
        DomainError::field_rule("email", "exists")
    );
    assert!(h.mailer.jobs().is_empty());
}

#[tokio::test]
async fn test_password_reset_wrong_or_expired_token() {
    let h = harness();
    h.service.register(registration("ana@example.com"), Utc::now()).await.unwrap();

    let created_at = Utc::now() - Duration::minutes(61);
    h.resets
        .store(PasswordResetRecord {
            email: "ana@example.com".to_string(),
            token_hash: hash_token("viejo"),
            created_at,
        })
        .await
        .unwrap();

    let invalid = DomainError::field_rule("email", "reset_token");
    assert_eq!(
        h.service
            .reset_password("ana@example.com", "otro", "nuevaClave456", Utc::now())
            .await
            .unwrap_err(),
        invalid
    );
    assert_eq!(
        h.service
            .reset_password("ana@example.com", "viejo", "nuevaClave456", Utc::now())
            .await
            .unwrap_err(),
        invalid
    );
    assert!(h.resets.find("ana@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_verify_email_from_link() {
    let h = harness();
    let now = Utc::now();
    let (user, _) = h.service.register(registration("ana@example.com"), now).await.unwrap();
    let params = verification_params(h.mailer.jobs()[0].url());

    assert!(h.service.verify_email(&params, now).await.unwrap());
    assert!(!h.service.verify_email(&params, now).await.unwrap());

    let stored = h.service.current_user(user.id, &RelationSet::none()).await.unwrap();
    assert!(stored.has_verified_email());
}

#[tokio::test]
async fn test_verify_email_rejects_tampering_and_expiry() {
    let h = harness();
    let now = Utc::now();
    h.service.register(registration("ana@example.com"), now).await.unwrap();
    let params = verification_params(h.mailer.jobs()[0].url());

    let mut tampered = params.clone();
    tampered.signature = "0".repeat(64);
    assert_eq!(
        h.service.verify_email(&tampered, now).await.unwrap_err(),
        DomainError::Forbidden
    );
    assert_eq!(
        h.service
            .verify_email(&params, now + Duration::minutes(120))
            .await
            .unwrap_err(),
        DomainError::Forbidden
    );
}

#[tokio::test]
async fn test_resend_verification() {
    let h = harness();
    let now = Utc::now();
    let (user, _) = h.service.register(registration("ana@example.com"), now).await.unwrap();

    assert!(h.service.resend_verification(user.id, now).await.unwrap());
    assert_eq!(h.mailer.jobs().len(), 2);

    let params = verification_params(h.mailer.jobs()[1].url());
    h.service.verify_email(&params, now).await.unwrap();
    assert!(!h.service.resend_verification(user.id, now).await.unwrap());
    assert_eq!(h.mailer.jobs().len(), 2);
}

#[tokio::test]
async fn test_current_user_unknown() {
    let h = harness();
    assert_eq!(
        h.service.current_user(404, &RelationSet::all()).await.unwrap_err(),
        DomainError::not_found("user")
    );
}
