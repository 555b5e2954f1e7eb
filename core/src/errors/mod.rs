//! Domain error types.
//!
//! Variants carry codes rather than user-facing text; messages are localized
//! by the presentation layer.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or invalid credentials
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Authenticated caller lacks the role or permission required
    #[error("Forbidden")]
    Forbidden,

    /// Entity lookup returned nothing
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A business rule rejected one input field (e.g. `email` / `unique`)
    #[error("Field {field} failed rule {rule}")]
    FieldRule { field: String, rule: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn field_rule(field: impl Into<String>, rule: impl Into<String>) -> Self {
        DomainError::FieldRule {
            field: field.into(),
            rule: rule.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(DomainError::not_found("user").to_string(), "Resource not found: user");
        assert_eq!(
            DomainError::field_rule("email", "unique").to_string(),
            "Field email failed rule unique"
        );
        assert_eq!(DomainError::internal("boom").to_string(), "Internal error: boom");
    }
}
