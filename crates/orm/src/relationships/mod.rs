//! Relationships Module - relation containers, metadata, registry and cycle guard

pub mod containers;
pub mod metadata;
pub mod registry;
pub mod guard;

pub use containers::{HasMany, RelationshipLoadingState};
pub use metadata::{RelationshipMetadata, RelationshipType};
pub use registry::{RegistryStats, RelationshipRegistry};
pub use guard::{ancestors, has_ancestor_of_type, leads_back};
