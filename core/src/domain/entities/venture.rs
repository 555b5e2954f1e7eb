//! Business ventures (emprendimientos) and user affiliations to them.

use serde::{Deserialize, Serialize};

/// A tourism business run by one or more users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venture {
    pub id: u64,
    pub name: String,
}

/// A user's membership in a venture, with the attributes carried on the join record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentureAffiliation {
    pub venture: Venture,
    /// Whether this is the user's main venture
    pub is_primary: bool,
    /// The user's role within the venture (e.g. "propietario", "administrador")
    pub role: String,
}

impl VentureAffiliation {
    pub fn new(venture: Venture, is_primary: bool, role: impl Into<String>) -> Self {
        Self {
            venture,
            is_primary,
            role: role.into(),
        }
    }
}
