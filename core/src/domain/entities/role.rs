//! Roles and permissions granted to users.

use serde::{Deserialize, Serialize};

/// Role name that grants administrative access
pub const ADMIN_ROLE: &str = "admin";

/// Role assigned to every self-registered account
pub const DEFAULT_ROLE: &str = "turista";

/// A named permission, granted directly or through a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub name: String,
}

impl Permission {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A role and the permissions it bundles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    /// Only meaningful when the role's permissions were loaded
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Human-facing name: the stored name with its first letter upper-cased
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
