//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::domain::relations::RelationSet;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Lookups take the set of relations to eager-load. Relations outside the set
/// are left empty on the returned entity.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: u64, relations: &RelationSet) -> Result<Option<User>, DomainError>;

    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str, relations: &RelationSet) -> Result<Option<User>, DomainError>;

    /// List every user, ordered by id
    async fn list(&self, relations: &RelationSet) -> Result<Vec<User>, DomainError>;

    /// Check whether an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new user and attach the named roles
    ///
    /// # Returns
    /// * `Ok(User)` - The created user with its id, timestamps and roles (with permissions)
    /// * `Err(DomainError)` - Creation failed (e.g. unknown role)
    async fn create(&self, user: User, roles: &[&str]) -> Result<User, DomainError>;

    /// Update the scalar fields of an existing user; relations are untouched
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
