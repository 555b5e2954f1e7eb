//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language preference for localized messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Negotiate a language from an `Accept-Language` header value.
    ///
    /// Entries are weighted by their `q` parameter; the highest-weighted
    /// supported language wins. Returns `None` when nothing supported is listed,
    /// leaving the caller to apply its configured default.
    ///
    /// Example: `"es-CO,es;q=0.9,en-US;q=0.8"` → `Some(Language::Spanish)`
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut preferred = None;
        let mut max_quality = 0.0_f32;

        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().trim().to_lowercase();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let candidate = if tag.starts_with("es") {
                Some(Language::Spanish)
            } else if tag.starts_with("en") {
                Some(Language::English)
            } else {
                None
            };

            if let Some(lang) = candidate {
                if quality > max_quality {
                    preferred = Some(lang);
                    max_quality = quality;
                }
            }
        }

        preferred
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Pick the text matching this language
    pub fn pick<'a>(&self, en: &'a str, es: &'a str) -> &'a str {
        match self {
            Language::English => en,
            Language::Spanish => es,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "en-us" | "en-gb" => Ok(Language::English),
            "es" | "spanish" | "español" | "es-es" | "es-co" | "es-mx" => Ok(Language::Spanish),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
