//! Explicit sets of relations a caller has loaded for an entity.
//!
//! Repositories are told which relations to fetch, and transformers are told
//! which relations were fetched, so neither has to inspect lazy-load state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A named association on a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// `roles`
    Roles,
    /// `roles.permissions`: the permissions bundled by each loaded role
    RolePermissions,
    /// `permissions`: directly granted permissions
    Permissions,
    /// `emprendimientos`: venture affiliations with their join attributes
    Emprendimientos,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Roles,
        Relation::RolePermissions,
        Relation::Permissions,
        Relation::Emprendimientos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Relation::Roles => "roles",
            Relation::RolePermissions => "roles.permissions",
            Relation::Permissions => "permissions",
            Relation::Emprendimientos => "emprendimientos",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relation::ALL
            .iter()
            .copied()
            .find(|relation| relation.name() == s.trim())
            .ok_or_else(|| format!("Unknown relation: {}", s))
    }
}

/// Ordered set of loaded relations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet(BTreeSet<Relation>);

impl RelationSet {
    /// No relations loaded
    pub fn none() -> Self {
        Self::default()
    }

    /// Every relation loaded
    pub fn all() -> Self {
        Relation::ALL.iter().copied().collect()
    }

    pub fn with(mut self, relation: Relation) -> Self {
        self.0.insert(relation);
        self
    }

    pub fn insert(&mut self, relation: Relation) {
        self.0.insert(relation);
    }

    pub fn contains(&self, relation: Relation) -> bool {
        self.0.contains(&relation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Relation> + '_ {
        self.0.iter().copied()
    }

    /// Relations a repository has to load to serve this set.
    ///
    /// The flattened `permissions` list includes permissions inherited
    /// through roles, so it needs every role with its permissions.
    pub fn with_dependencies(&self) -> Self {
        let mut set = self.clone();
        if set.contains(Relation::Permissions) {
            set.insert(Relation::Roles);
            set.insert(Relation::RolePermissions);
        }
        set
    }

    /// Parses a comma-separated include list such as `roles,emprendimientos`.
    ///
    /// `roles.permissions` implies `roles`.
    pub fn parse_list(list: &str) -> Result<Self, String> {
        let mut set = Self::none();
        for item in list.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let relation: Relation = item.parse()?;
            if relation == Relation::RolePermissions {
                set.insert(Relation::Roles);
            }
            set.insert(relation);
        }
        Ok(set)
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
