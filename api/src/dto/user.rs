use actix_web::{HttpMessage, HttpRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tm_core::services::ProfileUpdate;
use validator::Validate;

use crate::middleware::auth::AuthContext;
use crate::validation::{Authorization, FormRequest};

use super::auth::language_rule;

/// Accepted format of `birth_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query string of `GET /api/users/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeQuery {
    /// Comma-separated relation names
    pub include: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, code = "between"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20, code = "max"))]
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    #[validate(length(max = 2048, code = "max"))]
    pub foto_perfil: Option<String>,
    pub preferred_language: Option<String>,
}

impl FormRequest for UpdateUserRequest {
    /// A user may edit their own profile; admins may edit any
    fn authorize(req: &HttpRequest) -> Authorization {
        let target = req.match_info().get("id").and_then(|id| id.parse::<u64>().ok());
        let allowed = match (req.extensions().get::<AuthContext>(), target) {
            (Some(auth), Some(target)) => auth.is_self_or_admin(target),
            _ => false,
        };
        Authorization::from_bool(allowed)
    }

    fn after_validation(&self) -> Vec<(&'static str, &'static str)> {
        let mut failures = Vec::new();
        if let Some(date) = &self.birth_date {
            if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                failures.push(("birth_date", "date"));
            }
        }
        failures.extend(language_rule(&self.preferred_language));
        failures
    }
}

impl UpdateUserRequest {
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name,
            email: self.email,
            phone: self.phone,
            birth_date: self
                .birth_date
                .and_then(|date| NaiveDate::parse_from_str(&date, DATE_FORMAT).ok()),
            foto_perfil: self.foto_perfil,
            preferred_language: self.preferred_language.and_then(|code| code.parse().ok()),
        }
    }
}
