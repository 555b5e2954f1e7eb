//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tm_shared::config::AuthConfig;

use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::domain::value_objects::IssuedToken;
use crate::errors::{DomainError, DomainResult};

/// Service for issuing and verifying HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenService {
    /// Creates a new token service from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_seconds: config.token_ttl_seconds,
        }
    }

    /// Issue a token for a user whose roles are loaded with their permissions
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> DomainResult<IssuedToken> {
        let claims = Claims::for_user(user, now, self.ttl_seconds);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token encoding failed: {}", e)))?;
        Ok(IssuedToken::bearer(token, self.ttl_seconds))
    }

    /// Verify a token's signature, issuer, audience and expiry
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                DomainError::Unauthenticated
            })
    }
}
