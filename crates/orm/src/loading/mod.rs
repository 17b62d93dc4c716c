//! Loading - fetch plans describing which relations a fetch loads

pub mod paths;
pub mod plan;
pub mod builder;

pub use paths::{join_path, parse_attribute_paths, reduce_paths};
pub use plan::FetchPlan;
pub use builder::{FetchPlanBuilder, ResolvedPath, DEFAULT_MAX_DEPTH};
