//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::role::Role;
use crate::domain::entities::user::User;
use crate::domain::relations::{Relation, RelationSet};
use crate::errors::DomainError;

use super::UserRepository;

#[derive(Default)]
struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

/// User repository holding fully-loaded users in memory
///
/// Lookups project each stored user down to the requested relations, the same
/// way an eager-loading query would.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
    roles: HashMap<String, Role>,
}

impl InMemoryUserRepository {
    /// Create a repository with no users and no role catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose `create` can attach the given roles by name
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            store: RwLock::default(),
            roles: roles.into_iter().map(|role| (role.name.clone(), role)).collect(),
        }
    }

    /// Insert a user with all of its relations as given, assigning an id when it has none
    pub fn seed(&self, mut user: User) -> Result<User, DomainError> {
        let mut store = self.write()?;
        if user.id == 0 {
            store.next_id += 1;
            user.id = store.next_id;
        } else {
            store.next_id = store.next_id.max(user.id);
        }
        if user.created_at.is_none() {
            user.created_at = Some(Utc::now());
        }
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Number of stored users
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.users.len())
    }

    /// Whether no users are stored
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.read()?.users.is_empty())
    }

    /// Snapshot of every stored user with all relations
    pub fn snapshot(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, DomainError> {
        self.store
            .read()
            .map_err(|_| DomainError::internal("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, DomainError> {
        self.store
            .write()
            .map_err(|_| DomainError::internal("user store lock poisoned"))
    }
}

/// Strip the relations the caller did not ask for
fn project(user: &User, relations: &RelationSet) -> User {
    let relations = relations.with_dependencies();
    let mut projected = user.clone();
    if relations.contains(Relation::Roles) {
        if !relations.contains(Relation::RolePermissions) {
            for role in &mut projected.roles {
                role.permissions.clear();
            }
        }
    } else {
        projected.roles.clear();
    }
    if !relations.contains(Relation::Permissions) {
        projected.permissions.clear();
    }
    if !relations.contains(Relation::Emprendimientos) {
        projected.emprendimientos.clear();
    }
    projected
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: u64, relations: &RelationSet) -> Result<Option<User>, DomainError> {
        let store = self.read()?;
        Ok(store.users.get(&id).map(|user| project(user, relations)))
    }

    async fn find_by_email(&self, email: &str, relations: &RelationSet) -> Result<Option<User>, DomainError> {
        let store = self.read()?;
        Ok(store
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .map(|user| project(user, relations)))
    }

    async fn list(&self, relations: &RelationSet) -> Result<Vec<User>, DomainError> {
        let store = self.read()?;
        Ok(store.users.values().map(|user| project(user, relations)).collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let store = self.read()?;
        Ok(store.users.values().any(|user| user.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, mut user: User, roles: &[&str]) -> Result<User, DomainError> {
        let mut attached = Vec::with_capacity(roles.len());
        for name in roles {
            let role = self
                .roles
                .get(*name)
                .cloned()
                .ok_or_else(|| DomainError::internal(format!("unknown role: {}", name)))?;
            attached.push(role);
        }

        let mut store = self.write()?;
        if store.users.values().any(|existing| existing.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::field_rule("email", "unique"));
        }

        let now = Utc::now();
        store.next_id += 1;
        user.id = store.next_id;
        user.roles = attached;
        user.created_at = Some(now);
        user.updated_at = Some(now);
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut store = self.write()?;
        let stored = store
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("user"))?;

        stored.name = user.name;
        stored.email = user.email;
        stored.phone = user.phone;
        stored.birth_date = user.birth_date;
        stored.profile_photo = user.profile_photo;
        stored.preferred_language = user.preferred_language;
        stored.password_hash = user.password_hash;
        stored.email_verified_at = user.email_verified_at;
        stored.last_login_at = user.last_login_at;
        stored.updated_at = Some(Utc::now());

        Ok(stored.clone())
    }
}
