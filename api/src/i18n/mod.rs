//! Localized messages for API responses.
//!
//! The catalogue is embedded at compile time from `i18n/messages.toml`.

use actix_web::{http::header::ACCEPT_LANGUAGE, HttpMessage, HttpRequest};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tm_shared::Language;

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub es: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Language) -> &str {
        lang.pick(&self.en, &self.es)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageCatalog {
    #[serde(default)]
    pub categories: HashMap<String, LocalizedText>,
    #[serde(default)]
    pub rules: HashMap<String, LocalizedText>,
    #[serde(default)]
    pub success: HashMap<String, LocalizedText>,
}

pub static MESSAGES: Lazy<MessageCatalog> = Lazy::new(|| {
    toml::from_str(include_str!("../../i18n/messages.toml")).unwrap_or_else(|e| {
        log::error!("Failed to parse message catalogue: {}", e);
        MessageCatalog::default()
    })
});

/// Fixed message of an error category (`authentication`, `not_found`, ...)
pub fn category_message(key: &str, lang: Language) -> String {
    lookup(&MESSAGES.categories, key, lang).unwrap_or_else(|| key.to_string())
}

/// Message for a failed validation rule on a field.
///
/// Unknown rules fall back to the generic `invalid` message.
pub fn rule_message(rule: &str, field: &str, params: &HashMap<String, String>, lang: Language) -> String {
    let template = lookup(&MESSAGES.rules, rule, lang)
        .or_else(|| lookup(&MESSAGES.rules, "invalid", lang))
        .unwrap_or_else(|| "The {field} field is invalid.".to_string());

    let mut values: HashMap<&str, String> = params.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    values.insert("field", field.replace('_', " "));
    format_message(&template, &values)
}

/// Message for a successful operation
pub fn success_message(key: &str, lang: Language) -> String {
    lookup(&MESSAGES.success, key, lang).unwrap_or_else(|| key.to_string())
}

pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Language negotiated for a request.
///
/// The error-handling middleware stores the negotiated language in the
/// request extensions; without it the `Accept-Language` header is consulted
/// directly, falling back to English.
pub fn request_language(req: &HttpRequest) -> Language {
    if let Some(lang) = req.extensions().get::<Language>() {
        return *lang;
    }
    req.headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(Language::from_accept_language)
        .unwrap_or_default()
}

fn lookup(table: &HashMap<String, LocalizedText>, key: &str, lang: Language) -> Option<String> {
    table.get(key).map(|text| text.get(lang).to_string())
}
