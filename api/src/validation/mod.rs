//! Validation request layer.
//!
//! A [`FormRequest`] is an input schema: its `validator` derive declares the
//! field rules, [`FormRequest::messages`] overrides the default rule text and
//! [`FormRequest::authorize`] decides whether the caller may submit it at all.
//! The [`Validated`] extractor runs authorization first, then parses and
//! validates the body, and hands the handler a value that passed every rule.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::ops::Deref;
use tm_shared::types::response::FieldErrors;
use tm_shared::Language;
use validator::{Validate, ValidationErrors};

use crate::handlers::error::ApiError;
use crate::i18n;

/// Outcome of a schema's authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

impl Authorization {
    pub fn from_bool(allowed: bool) -> Self {
        if allowed {
            Authorization::Allowed
        } else {
            Authorization::Denied
        }
    }
}

/// An input schema validated before its handler runs
pub trait FormRequest: DeserializeOwned + Validate + 'static {
    /// Checked before the body is read; `Denied` is an authorization failure
    fn authorize(_req: &HttpRequest) -> Authorization {
        Authorization::Allowed
    }

    /// Message overrides keyed `"field.rule"`
    fn messages(_lang: Language) -> HashMap<&'static str, String> {
        HashMap::new()
    }

    /// Cross-field and format rules the derive cannot express, as
    /// `(field, rule)` pairs
    fn after_validation(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}

/// Extractor yielding a body that passed its schema
#[derive(Debug)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: FormRequest> FromRequest for Validated<T> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let authorization = T::authorize(req);
        let language = i18n::request_language(req);
        let path = req.path().to_string();
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            if authorization == Authorization::Denied {
                log::warn!("Request to {} denied by its form authorization", path);
                return Err(ApiError::Forbidden);
            }

            let bytes = body.await.map_err(|e| ApiError::InvalidBody(e.to_string()))?;
            let value: T = parse_body(&bytes)?;

            let errors = collect_errors(&value, language);
            if !errors.is_empty() {
                log::debug!("Validation failed on {}: {:?}", path, errors);
                return Err(ApiError::Validation(errors));
            }
            Ok(Validated(value))
        })
    }
}

/// Parse a JSON body; an empty body is read as `{}`
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let trimmed = bytes.iter().all(|b| b.is_ascii_whitespace());
    let source: &[u8] = if trimmed { b"{}" } else { bytes };
    serde_json::from_slice(source).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Every rule violation of `value`, localized and keyed by field
pub fn collect_errors<T: FormRequest>(value: &T, lang: Language) -> FieldErrors {
    let overrides = T::messages(lang);
    let mut errors = FieldErrors::new();

    if let Err(failures) = value.validate() {
        append_validator_errors(&mut errors, &failures, &overrides, lang);
    }

    for (field, rule) in value.after_validation() {
        let message = overrides
            .get(format!("{}.{}", field, rule).as_str())
            .cloned()
            .unwrap_or_else(|| i18n::rule_message(rule, field, &HashMap::new(), lang));
        errors.entry(field.to_string()).or_default().push(message);
    }

    errors
}

fn append_validator_errors(
    errors: &mut FieldErrors,
    failures: &ValidationErrors,
    overrides: &HashMap<&'static str, String>,
    lang: Language,
) {
    for (field, field_failures) in failures.field_errors() {
        let field = field.to_string();
        for failure in field_failures.iter() {
            let code = failure.code.to_string();
            let message = match overrides.get(format!("{}.{}", field, code).as_str()) {
                Some(message) => message.clone(),
                None => match &failure.message {
                    Some(message) => message.to_string(),
                    None => {
                        let params: HashMap<String, String> = failure
                            .params
                            .iter()
                            .map(|(key, value)| (key.to_string(), param_text(value)))
                            .collect();
                        i18n::rule_message(&code, &field, &params, lang)
                    }
                },
            };
            errors.entry(field.clone()).or_default().push(message);
        }
    }
}

fn param_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
