//! Per-type mappers turning records into output records

use serde::Serialize;

use crate::model::Record;
use super::context::TraversalContext;
use super::options::MappingOptions;

pub mod person;
pub mod address;
pub mod contact;
pub mod role;
pub mod permission;

pub use person::PersonMapper;
pub use address::AddressMapper;
pub use contact::ContactMapper;
pub use role::RoleMapper;
pub use permission::PermissionMapper;

/// Projection of one record type under mapping options
///
/// Mappers are stateless; a projection never mutates its input.
pub trait EntityMapper: Send + Sync {
    type Entity: Record;
    type Dto: Serialize + Clone + Send;

    /// Project `entity` as a node of an ongoing traversal
    fn to_dto_in(&self, entity: &Self::Entity, options: &MappingOptions, ctx: &TraversalContext) -> Self::Dto;

    /// Project `entity` as the root of a new traversal
    fn to_dto(&self, entity: &Self::Entity, options: &MappingOptions) -> Self::Dto {
        self.to_dto_in(entity, options, &TraversalContext::root())
    }

    /// Absent input maps to absent output
    fn to_dto_opt(&self, entity: Option<&Self::Entity>, options: &MappingOptions) -> Option<Self::Dto> {
        entity.map(|entity| self.to_dto(entity, options))
    }

    fn to_dto_list(&self, entities: &[Self::Entity], options: &MappingOptions) -> Vec<Self::Dto> {
        entities.iter().map(|entity| self.to_dto(entity, options)).collect()
    }

    /// Minimal projection
    fn to_simple_dto(&self, entity: &Self::Entity) -> Self::Dto {
        self.to_dto(entity, &MappingOptions::minimal())
    }
}
