//! Mapping - projection of record graphs into output records
//!
//! A projection is driven by [`MappingOptions`]: a [`MappingLevel`], explicit
//! attribute paths, or both. Mappers walk loaded relations only and carry a
//! [`TraversalContext`] so that records already being projected are never
//! entered twice.

pub mod level;
pub mod options;
pub mod context;
pub mod dto;
pub mod utils;
pub mod mappers;

pub use level::MappingLevel;
pub use options::MappingOptions;
pub use context::TraversalContext;
pub use dto::{AddressDto, AuditDto, ContactDto, PermissionDto, PersonDto, PersonSummaryDto, RoleDto};
pub use utils::{extract_ids, safe_count};
pub use mappers::{AddressMapper, ContactMapper, EntityMapper, PermissionMapper, PersonMapper, RoleMapper};
