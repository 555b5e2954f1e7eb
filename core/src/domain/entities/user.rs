//! User entity representing a registered account in the Turismo system.

use chrono::{DateTime, NaiveDate, Utc};
use tm_shared::Language;

use super::role::{Permission, Role, ADMIN_ROLE};
use super::venture::VentureAffiliation;

/// User entity
///
/// Relation slots (`roles`, `permissions`, `emprendimientos`) are only
/// meaningful for the relations the repository was asked to load; an empty
/// slot does not imply an empty relation.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier, 0 until persisted
    pub id: u64,

    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    /// Stored profile photo: a storage path or an absolute URL
    pub profile_photo: Option<String>,

    pub preferred_language: Language,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub email_verified_at: Option<DateTime<Utc>>,

    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,

    pub roles: Vec<Role>,

    /// Permissions granted directly, not through a role
    pub permissions: Vec<Permission>,

    pub emprendimientos: Vec<VentureAffiliation>,
}

impl User {
    /// Creates a new, unpersisted user
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            phone: None,
            birth_date: None,
            profile_photo: None,
            preferred_language: Language::default(),
            password_hash: password_hash.into(),
            email_verified_at: None,
            last_login_at: None,
            created_at: None,
            updated_at: None,
            roles: Vec::new(),
            permissions: Vec::new(),
            emprendimientos: Vec::new(),
        }
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.name.clone()).collect()
    }

    /// Direct permissions followed by those inherited through roles,
    /// de-duplicated in first-seen order
    pub fn all_permission_names(&self) -> Vec<String> {
        let direct = self.permissions.iter();
        let inherited = self.roles.iter().flat_map(|role| role.permissions.iter());
        collect_unique_names(direct.chain(inherited))
    }

    pub fn has_verified_email(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Marks the email as verified; returns false if it already was
    pub fn mark_email_verified(&mut self, now: DateTime<Utc>) -> bool {
        if self.has_verified_email() {
            return false;
        }
        self.email_verified_at = Some(now);
        self.updated_at = Some(now);
        true
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
    }
}

/// Names of the given permissions, de-duplicated in first-seen order
fn collect_unique_names<'a>(permissions: impl Iterator<Item = &'a Permission>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for permission in permissions {
        if !names.iter().any(|name| name == &permission.name) {
            names.push(permission.name.clone());
        }
    }
    names
}
