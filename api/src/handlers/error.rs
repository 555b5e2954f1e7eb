//! Failure taxonomy and the exception-to-HTTP mapper.
//!
//! Handlers and extractors fail with [`ApiError`]; the framework also raises
//! its own errors (bad path segments, payload errors). Neither formats JSON
//! itself: [`ExceptionMapper`] turns any of them into an envelope, and the
//! error-handling middleware only asks it to when the client expects JSON.

use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpResponse, ResponseError,
};
use std::collections::HashMap;
use thiserror::Error;
use tm_core::errors::DomainError;
use tm_shared::types::response::FieldErrors;
use tm_shared::Language;

use crate::handlers::response;
use crate::i18n;

/// Errors raised by handlers and extractors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Per-field messages, already localized
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// A single field failed a rule; localized when rendered
    #[error("Field {field} failed rule {rule}")]
    FieldRule { field: String, rule: String },

    /// The request body could not be read or parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::FieldRule { .. } | ApiError::InvalidBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Unauthenticated => ApiError::Unauthenticated,
            DomainError::Forbidden => ApiError::Forbidden,
            DomainError::NotFound { resource } => ApiError::NotFound(resource),
            DomainError::FieldRule { field, rule } => ApiError::FieldRule { field, rule },
            DomainError::Internal { message } => ApiError::Internal(message),
        }
    }
}

/// The closed set of failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Authentication,
    Validation,
    Authorization,
    NotFound,
    Generic,
}

impl FailureCategory {
    /// Key of the category's message in the catalogue
    pub fn message_key(&self) -> &'static str {
        match self {
            FailureCategory::Authentication => "authentication",
            FailureCategory::Validation => "validation",
            FailureCategory::Authorization => "authorization",
            FailureCategory::NotFound => "not_found",
            FailureCategory::Generic => "generic",
        }
    }
}

/// One entry of the mapper: which failures it claims and how they render
#[derive(Clone, Copy)]
pub struct ExceptionMapping {
    pub category: FailureCategory,
    pub status: StatusCode,
    pub matches: fn(&actix_web::Error) -> bool,
}

impl std::fmt::Debug for ExceptionMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionMapping")
            .field("category", &self.category)
            .field("status", &self.status)
            .finish()
    }
}

const GENERIC_MAPPING: ExceptionMapping = ExceptionMapping {
    category: FailureCategory::Generic,
    status: StatusCode::INTERNAL_SERVER_ERROR,
    matches: any_failure,
};

/// Ordered chain of mappings, built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct ExceptionMapper {
    mappings: Vec<ExceptionMapping>,
    debug: bool,
    default_language: Language,
}

impl ExceptionMapper {
    /// The standard chain: authentication, validation, authorization,
    /// not found, then the generic catch-all
    pub fn standard(debug: bool, default_language: Language) -> Self {
        Self {
            mappings: vec![
                ExceptionMapping {
                    category: FailureCategory::Authentication,
                    status: StatusCode::UNAUTHORIZED,
                    matches: is_authentication_failure,
                },
                ExceptionMapping {
                    category: FailureCategory::Validation,
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    matches: is_validation_failure,
                },
                ExceptionMapping {
                    category: FailureCategory::Authorization,
                    status: StatusCode::FORBIDDEN,
                    matches: is_authorization_failure,
                },
                ExceptionMapping {
                    category: FailureCategory::NotFound,
                    status: StatusCode::NOT_FOUND,
                    matches: is_not_found,
                },
                GENERIC_MAPPING,
            ],
            debug,
            default_language,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Language for an `Accept-Language` value, or the configured default
    pub fn negotiate_language(&self, accept_language: Option<&str>) -> Language {
        accept_language
            .and_then(Language::from_accept_language)
            .unwrap_or(self.default_language)
    }

    /// First mapping claiming the error; the generic mapping when none does
    pub fn classify(&self, err: &actix_web::Error) -> &ExceptionMapping {
        self.mappings
            .iter()
            .find(|mapping| (mapping.matches)(err))
            .unwrap_or(&GENERIC_MAPPING)
    }

    /// Render an error as a JSON envelope in the given language
    pub fn render(&self, err: &actix_web::Error, lang: Language) -> HttpResponse {
        let mapping = self.classify(err);
        match mapping.category {
            FailureCategory::Validation => {
                log::debug!("Validation failure: {}", err);
                response::validation_error(field_errors(err, lang))
            }
            FailureCategory::Generic => {
                log::error!("Unhandled failure: {}", err);
                let message = i18n::category_message(mapping.category.message_key(), lang);
                let message = if self.debug {
                    format!("{}: {}", message, err)
                } else {
                    message
                };
                response::error(message, mapping.status, None)
            }
            category => {
                log::warn!("{:?} failure: {}", category, err);
                response::error(
                    i18n::category_message(category.message_key(), lang),
                    mapping.status,
                    None,
                )
            }
        }
    }
}

fn status_of(err: &actix_web::Error) -> StatusCode {
    err.as_response_error().status_code()
}

fn is_authentication_failure(err: &actix_web::Error) -> bool {
    matches!(err.as_error::<ApiError>(), Some(ApiError::Unauthenticated)) || status_of(err) == StatusCode::UNAUTHORIZED
}

fn is_validation_failure(err: &actix_web::Error) -> bool {
    matches!(
        err.as_error::<ApiError>(),
        Some(ApiError::Validation(_) | ApiError::FieldRule { .. } | ApiError::InvalidBody(_))
    ) || err.as_error::<JsonPayloadError>().is_some()
        || status_of(err) == StatusCode::UNPROCESSABLE_ENTITY
}

fn is_authorization_failure(err: &actix_web::Error) -> bool {
    matches!(err.as_error::<ApiError>(), Some(ApiError::Forbidden)) || status_of(err) == StatusCode::FORBIDDEN
}

fn is_not_found(err: &actix_web::Error) -> bool {
    matches!(err.as_error::<ApiError>(), Some(ApiError::NotFound(_)))
        || err.as_error::<PathError>().is_some()
        || status_of(err) == StatusCode::NOT_FOUND
}

fn any_failure(_: &actix_web::Error) -> bool {
    true
}

/// Field map carried by a validation failure, localized for `lang`
fn field_errors(err: &actix_web::Error, lang: Language) -> FieldErrors {
    let no_params = HashMap::new();
    let mut errors = FieldErrors::new();
    match err.as_error::<ApiError>() {
        Some(ApiError::Validation(fields)) => errors = fields.clone(),
        Some(ApiError::FieldRule { field, rule }) => {
            errors.insert(field.clone(), vec![i18n::rule_message(rule, field, &no_params, lang)]);
        }
        Some(ApiError::InvalidBody(_)) => {
            errors.insert("body".to_string(), vec![i18n::rule_message("json", "body", &no_params, lang)]);
        }
        _ if err.as_error::<JsonPayloadError>().is_some() => {
            errors.insert("body".to_string(), vec![i18n::rule_message("json", "body", &no_params, lang)]);
        }
        _ => {}
    }
    errors
}
