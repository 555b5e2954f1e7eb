//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use tm_shared::utils::mask_email;
use tm_shared::Language;

use crate::domain::entities::role::DEFAULT_ROLE;
use crate::domain::entities::user::User;
use crate::domain::relations::{Relation, RelationSet};
use crate::domain::value_objects::IssuedToken;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{PasswordResetRecord, PasswordResetRepository, UserRepository};
use crate::services::mail::{email_hash, LinkBuilder, MailJob, MailQueue, VerificationParams};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{generate_reset_token, hash_password, hash_token, verify_password};

/// Input for creating a self-registered account
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub preferred_language: Option<Language>,
}

/// Authentication service for the account lifecycle
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    resets: Arc<dyn PasswordResetRepository>,
    mailer: Arc<dyn MailQueue>,
    tokens: TokenService,
    links: LinkBuilder,
    config: AuthServiceConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        resets: Arc<dyn PasswordResetRepository>,
        mailer: Arc<dyn MailQueue>,
        tokens: TokenService,
        links: LinkBuilder,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            resets,
            mailer,
            tokens,
            links,
            config,
        }
    }

    /// The token service used to issue and verify access tokens
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Relations loaded for a freshly authenticated user
    pub fn session_relations() -> RelationSet {
        RelationSet::none()
            .with(Relation::Roles)
            .with(Relation::RolePermissions)
            .with(Relation::Permissions)
    }

    /// Create an account with the default role and queue its verification email.
    ///
    /// # Errors
    /// `FieldRule(email, unique)` when the email is taken
    pub async fn register(&self, registration: Registration, now: DateTime<Utc>) -> DomainResult<(User, IssuedToken)> {
        let email = registration.email.trim().to_lowercase();
        if self.users.email_exists(&email).await? {
            return Err(DomainError::field_rule("email", "unique"));
        }

        let hash = hash_password(&registration.password, self.config.bcrypt_cost)?;
        let mut user = User::new(registration.name.trim(), email, hash);
        user.phone = registration.phone.filter(|phone| !phone.trim().is_empty());
        if let Some(language) = registration.preferred_language {
            user.preferred_language = language;
        }

        let user = self.users.create(user, &[DEFAULT_ROLE]).await?;
        tracing::info!(user_id = user.id, email = %mask_email(&user.email), "User registered");

        self.enqueue_verification(&user, now)?;
        let token = self.tokens.issue(&user, now)?;
        Ok((user, token))
    }

    /// Check credentials and issue a token.
    ///
    /// # Errors
    /// `Unauthenticated` for an unknown email or a wrong password
    pub async fn login(&self, email: &str, password: &str, now: DateTime<Utc>) -> DomainResult<(User, IssuedToken)> {
        let relations = Self::session_relations();
        let mut user = match self.users.find_by_email(email.trim(), &relations).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email = %mask_email(email), "Login for unknown email");
                return Err(DomainError::Unauthenticated);
            }
        };

        if !verify_password(password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login with wrong password");
            return Err(DomainError::Unauthenticated);
        }

        user.record_login(now);
        let stored = self.users.update(user.clone()).await?;
        user.updated_at = stored.updated_at;

        let token = self.tokens.issue(&user, now)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, token))
    }

    /// Store a fresh reset token and queue the reset email.
    ///
    /// # Errors
    /// `FieldRule(email, exists)` when no account uses the email
    pub async fn send_password_reset(&self, email: &str, now: DateTime<Utc>) -> DomainResult<()> {
        let user = self
            .users
            .find_by_email(email.trim(), &RelationSet::none())
            .await?
            .ok_or_else(|| DomainError::field_rule("email", "exists"))?;

        let token = generate_reset_token();
        self.resets
            .store(PasswordResetRecord {
                email: user.email.clone(),
                token_hash: hash_token(&token),
                created_at: now,
            })
            .await?;

        let url = self.links.password_reset_url(&token, &user.email);
        self.mailer.enqueue(MailJob::password_reset(
            user.email.clone(),
            user.name.clone(),
            user.preferred_language,
            url,
        ))?;
        tracing::info!(user_id = user.id, "Password reset link queued");
        Ok(())
    }

    /// Consume a reset token and set a new password.
    ///
    /// # Errors
    /// `FieldRule(email, reset_token)` when the token is unknown, wrong or expired
    pub async fn reset_password(&self, email: &str, token: &str, password: &str, now: DateTime<Utc>) -> DomainResult<()> {
        let email = email.trim();
        let invalid = || DomainError::field_rule("email", "reset_token");

        let record = self.resets.find(email).await?.ok_or_else(invalid)?;
        if !constant_time_eq(record.token_hash.as_bytes(), hash_token(token).as_bytes()) {
            tracing::warn!(email = %mask_email(email), "Password reset with wrong token");
            return Err(invalid());
        }
        if record.created_at + Duration::minutes(self.config.password_reset_ttl_minutes) < now {
            self.resets.delete(email).await?;
            return Err(invalid());
        }

        let mut user = self
            .users
            .find_by_email(email, &RelationSet::none())
            .await?
            .ok_or_else(invalid)?;
        user.password_hash = hash_password(password, self.config.bcrypt_cost)?;
        self.users.update(user.clone()).await?;
        self.resets.delete(email).await?;

        tracing::info!(user_id = user.id, "Password reset");
        Ok(())
    }

    /// Mark an email as verified from a signed link.
    ///
    /// Returns false when the email was already verified.
    ///
    /// # Errors
    /// `Forbidden` for a bad signature, an expired link or a hash that does not
    /// match the user's current email; `NotFound` for an unknown user
    pub async fn verify_email(&self, params: &VerificationParams, now: DateTime<Utc>) -> DomainResult<bool> {
        self.links.verify(params, now)?;

        let mut user = self
            .users
            .find_by_id(params.id, &RelationSet::none())
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        if !constant_time_eq(email_hash(&user.email).as_bytes(), params.hash.as_bytes()) {
            return Err(DomainError::Forbidden);
        }

        if !user.mark_email_verified(now) {
            return Ok(false);
        }
        self.users.update(user).await?;
        tracing::info!(user_id = params.id, "Email verified");
        Ok(true)
    }

    /// Queue another verification email; false when already verified
    pub async fn resend_verification(&self, user_id: u64, now: DateTime<Utc>) -> DomainResult<bool> {
        let user = self.current_user(user_id, &RelationSet::none()).await?;
        if user.has_verified_email() {
            return Ok(false);
        }
        self.enqueue_verification(&user, now)?;
        Ok(true)
    }

    /// Load the authenticated user with the given relations
    pub async fn current_user(&self, user_id: u64, relations: &RelationSet) -> DomainResult<User> {
        self.users
            .find_by_id(user_id, relations)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    fn enqueue_verification(&self, user: &User, now: DateTime<Utc>) -> DomainResult<()> {
        let url = self.links.verification_url(user.id, &user.email, now);
        self.mailer.enqueue(MailJob::email_verification(
            user.email.clone(),
            user.name.clone(),
            user.preferred_language,
            url,
        ))
    }
}
