//! # roster-orm: level- and attribute-driven record projection
//!
//! Projects persisted person records (with their addresses, contacts,
//! roles and permissions) into output records whose shape is chosen per
//! request, and computes the minimal fetch plan each shape needs.
//!
//! - [`mapping`]: levels, options, traversal context and the per-type mappers
//! - [`loading`]: fetch plans and the plan builder
//! - [`relationships`]: relation containers, metadata, registry and cycle guard
//! - [`repository`]: the persistence collaborator and an in-memory store
//! - [`service`]: fetch-and-project entry points

pub mod config;
pub mod error;
pub mod loading;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod relationships;
pub mod repository;
pub mod seeding;
pub mod service;

pub use config::{Environment, ProjectionConfig};
pub use error::{ConfigError, ModelError, ModelResult};
pub use loading::{FetchPlan, FetchPlanBuilder};
pub use mapping::*;
pub use model::*;
pub use relationships::{HasMany, RelationshipMetadata, RelationshipRegistry, RelationshipType};
pub use repository::{MemoryStore, Repository};
pub use seeding::{DemoSeeder, Seeder, SeederManager};
pub use service::{PersonService, RecordService};
