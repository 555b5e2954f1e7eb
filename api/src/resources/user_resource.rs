//! Public JSON shape of a user.
//!
//! Optional blocks are driven by the relation set the caller loaded, never by
//! whether a relation slot on the entity happens to be empty. A block for a
//! relation that was not loaded is absent from the output, not null.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tm_core::domain::entities::user::User;
use tm_core::domain::relations::{Relation, RelationSet};
use tm_core::services::{resolve_public_url, StorageUrlResolver};
use tm_shared::Language;

/// Date format of `birth_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of every timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub foto_perfil: Option<String>,
    pub foto_perfil_url: Option<String>,
    pub preferred_language: Language,
    pub email_verified: bool,
    pub email_verified_at: Option<String>,
    pub last_login_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RolesBlock>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionsBlock>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub ventures: Option<VenturesBlock>,
}

/// Present when `roles` was loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolesBlock {
    pub roles: Vec<String>,
    pub is_admin: bool,
    pub roles_info: Vec<RoleInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleInfo {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    /// Null unless the role's permissions were loaded
    pub permissions_count: Option<usize>,
}

/// Present when `permissions` was loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionsBlock {
    pub permissions: Vec<String>,
    pub has_permissions: bool,
}

/// Present when `emprendimientos` was loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenturesBlock {
    pub is_entrepreneur: bool,
    pub emprendimientos_count: usize,
    pub emprendimientos: Vec<VentureInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentureInfo {
    pub id: u64,
    pub name: String,
    pub is_primary: bool,
    pub role: String,
}

/// Transform a user with the given relations loaded
pub fn to_view(user: &User, loaded: &RelationSet, storage: &dyn StorageUrlResolver) -> UserView {
    UserView {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        birth_date: user.birth_date.as_ref().map(format_date),
        foto_perfil: user.profile_photo.clone(),
        foto_perfil_url: resolve_public_url(user.profile_photo.as_deref(), storage),
        preferred_language: user.preferred_language,
        email_verified: user.has_verified_email(),
        email_verified_at: user.email_verified_at.as_ref().map(format_timestamp),
        last_login_at: user.last_login_at.as_ref().map(format_timestamp),
        created_at: user.created_at.as_ref().map(format_timestamp),
        updated_at: user.updated_at.as_ref().map(format_timestamp),
        roles: loaded.contains(Relation::Roles).then(|| roles_block(user, loaded)),
        permissions: loaded.contains(Relation::Permissions).then(|| permissions_block(user)),
        ventures: loaded.contains(Relation::Emprendimientos).then(|| ventures_block(user)),
    }
}

/// Transform a collection with the same relation set
pub fn to_views(users: &[User], loaded: &RelationSet, storage: &dyn StorageUrlResolver) -> Vec<UserView> {
    users.iter().map(|user| to_view(user, loaded, storage)).collect()
}

fn roles_block(user: &User, loaded: &RelationSet) -> RolesBlock {
    let with_permissions = loaded.contains(Relation::RolePermissions);
    RolesBlock {
        roles: user.role_names(),
        is_admin: user.is_admin(),
        roles_info: user
            .roles
            .iter()
            .map(|role| RoleInfo {
                id: role.id,
                name: role.name.clone(),
                display_name: role.display_name(),
                permissions_count: with_permissions.then(|| role.permissions.len()),
            })
            .collect(),
    }
}

/// Direct and inherited permissions; repositories load roles with their
/// permissions whenever `permissions` is requested
fn permissions_block(user: &User) -> PermissionsBlock {
    let permissions = user.all_permission_names();
    PermissionsBlock {
        has_permissions: !permissions.is_empty(),
        permissions,
    }
}

fn ventures_block(user: &User) -> VenturesBlock {
    let emprendimientos: Vec<VentureInfo> = user
        .emprendimientos
        .iter()
        .map(|affiliation| VentureInfo {
            id: affiliation.venture.id,
            name: affiliation.venture.name.clone(),
            is_primary: affiliation.is_primary,
            role: affiliation.role.clone(),
        })
        .collect();
    VenturesBlock {
        is_entrepreneur: !emprendimientos.is_empty(),
        emprendimientos_count: emprendimientos.len(),
        emprendimientos,
    }
}

fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
