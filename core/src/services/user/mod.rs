//! User administration and profile updates

use std::sync::Arc;

use chrono::NaiveDate;
use tm_shared::Language;

use crate::domain::entities::user::User;
use crate::domain::relations::RelationSet;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Profile fields a user may change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub foto_perfil: Option<String>,
    pub preferred_language: Option<Language>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self, relations: &RelationSet) -> DomainResult<Vec<User>> {
        self.users.list(relations).await
    }

    /// # Errors
    /// `NotFound` when no user has the id
    pub async fn get(&self, id: u64, relations: &RelationSet) -> DomainResult<User> {
        self.users
            .find_by_id(id, relations)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    /// Apply a profile update and return the user with `relations` loaded.
    ///
    /// Changing the email clears its verification.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `FieldRule(email, unique)` when the new
    /// email belongs to another account
    pub async fn update_profile(&self, id: u64, update: ProfileUpdate, relations: &RelationSet) -> DomainResult<User> {
        let mut user = self.get(id, &RelationSet::none()).await?;

        if let Some(email) = update.email.map(|email| email.trim().to_lowercase()) {
            if !email.eq_ignore_ascii_case(&user.email) {
                if self.users.email_exists(&email).await? {
                    return Err(DomainError::field_rule("email", "unique"));
                }
                user.email = email;
                user.email_verified_at = None;
            }
        }
        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone).filter(|phone| !phone.trim().is_empty());
        }
        if let Some(birth_date) = update.birth_date {
            user.birth_date = Some(birth_date);
        }
        if let Some(photo) = update.foto_perfil {
            user.profile_photo = Some(photo).filter(|photo| !photo.trim().is_empty());
        }
        if let Some(language) = update.preferred_language {
            user.preferred_language = language;
        }

        self.users.update(user).await?;
        tracing::info!(user_id = id, "Profile updated");
        self.get(id, relations).await
    }
}
