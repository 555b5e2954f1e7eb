//! Domain layer containing business entities, relation sets and value objects.

pub mod entities;
pub mod relations;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use relations::{Relation, RelationSet};
pub use value_objects::*;
