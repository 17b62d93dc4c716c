//! Relationship Registry - Explicit per-type relation and attribute tables
//!
//! Every record type registers the relations and attribute names it declares.
//! The process-wide registry is built once on first use and is read-only
//! afterwards, so concurrent readers never take a lock.

use std::collections::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::model::{Address, Contact, Permission, Person, Record, RecordKind, Role};
use super::metadata::{RelationshipMetadata, RelationshipType};

static GLOBAL_REGISTRY: Lazy<RelationshipRegistry> = Lazy::new(RelationshipRegistry::standard);

/// Relation and attribute tables keyed by record kind
#[derive(Debug, Clone, Default)]
pub struct RelationshipRegistry {
    /// Record kind -> declared relations, in declaration order
    relationships: HashMap<RecordKind, Vec<RelationshipMetadata>>,

    /// Record kind -> projectable attribute names
    attributes: HashMap<RecordKind, Vec<String>>,
}

/// Statistics about the registry contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_kinds: usize,
    pub total_relationships: usize,
    pub mappable_relationships: usize,
    pub collection_relationships: usize,
}

impl RelationshipRegistry {
    /// Create a new empty relationship registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry holding the standard record types
    pub fn global() -> &'static RelationshipRegistry {
        &GLOBAL_REGISTRY
    }

    /// Registry with Person, Address, Contact, Role and Permission declared
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.insert_record::<Person>();
        registry.insert_record::<Address>();
        registry.insert_record::<Contact>();
        registry.insert_record::<Role>();
        registry.insert_record::<Permission>();
        registry
    }

    /// Register every relation and attribute a record type declares
    pub fn register_record<R: Record>(&mut self) -> ModelResult<()> {
        for metadata in R::relationships() {
            self.register(metadata)?;
        }
        self.register_attributes(R::kind(), R::attributes());
        Ok(())
    }

    /// Register a single relation
    pub fn register(&mut self, metadata: RelationshipMetadata) -> ModelResult<()> {
        metadata.validate()?;

        if self.relation(metadata.source, &metadata.path_segment).is_some() {
            return Err(ModelError::Relationship(format!(
                "Relationship '{}' is already registered on {}",
                metadata.path_segment, metadata.source
            )));
        }

        self.relationships
            .entry(metadata.source)
            .or_default()
            .push(metadata);
        Ok(())
    }

    /// Register projectable attribute names for a kind
    pub fn register_attributes(&mut self, kind: RecordKind, attributes: &[&str]) {
        let entry = self.attributes.entry(kind).or_default();
        for attribute in attributes {
            if !entry.iter().any(|existing| existing == attribute) {
                entry.push(attribute.to_string());
            }
        }
        // Kinds with only attributes still count as registered
        self.relationships.entry(kind).or_default();
    }

    fn insert_record<R: Record>(&mut self) {
        self.relationships
            .entry(R::kind())
            .or_default()
            .extend(R::relationships());
        self.register_attributes(R::kind(), R::attributes());
    }

    /// Check whether a kind has been registered
    pub fn is_registered(&self, kind: RecordKind) -> bool {
        self.relationships.contains_key(&kind)
    }

    /// All relations declared by a kind
    pub fn relationships_of(&self, kind: RecordKind) -> &[RelationshipMetadata] {
        self.relationships
            .get(&kind)
            .map(|relations| relations.as_slice())
            .unwrap_or(&[])
    }

    /// Relations of a kind that can be projected and fetched
    pub fn mappable_relations(&self, kind: RecordKind) -> impl Iterator<Item = &RelationshipMetadata> {
        self.relationships_of(kind).iter().filter(|metadata| metadata.mappable)
    }

    /// Look up a relation by its path segment
    pub fn relation(&self, kind: RecordKind, segment: &str) -> Option<&RelationshipMetadata> {
        self.relationships_of(kind)
            .iter()
            .find(|metadata| metadata.path_segment == segment)
    }

    /// Look up a mappable relation by its path segment
    pub fn mappable_relation(&self, kind: RecordKind, segment: &str) -> Option<&RelationshipMetadata> {
        self.relation(kind, segment).filter(|metadata| metadata.mappable)
    }

    /// Projectable attribute names of a kind
    pub fn attributes_of(&self, kind: RecordKind) -> &[String] {
        self.attributes
            .get(&kind)
            .map(|attributes| attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_attribute(&self, kind: RecordKind, name: &str) -> bool {
        self.attributes_of(kind).iter().any(|attribute| attribute == name)
    }

    /// Mappable relation whose contents an attribute such as `roleIds` is derived from
    pub fn relation_for_attribute(&self, kind: RecordKind, attribute: &str) -> Option<&RelationshipMetadata> {
        self.mappable_relations(kind).find(|metadata| metadata.derives(attribute))
    }

    /// Registered kinds in a stable order
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds: Vec<RecordKind> = self.relationships.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Find the relation on the target side that points back along `segment`
    pub fn find_inverse(&self, kind: RecordKind, segment: &str) -> Option<&RelationshipMetadata> {
        let metadata = self.relation(kind, segment)?;
        let inverse = metadata.inverse.as_deref()?;
        self.relation(metadata.target, inverse)
            .filter(|candidate| candidate.target == kind)
    }

    /// Get statistics about the registry
    pub fn stats(&self) -> RegistryStats {
        let all = || self.relationships.values().flatten();
        RegistryStats {
            total_kinds: self.relationships.len(),
            total_relationships: all().count(),
            mappable_relationships: all().filter(|metadata| metadata.mappable).count(),
            collection_relationships: all().filter(|metadata| metadata.is_collection()).count(),
        }
    }

    /// Validate all registered relationships
    pub fn validate_all(&self) -> ModelResult<()> {
        for (kind, relations) in &self.relationships {
            for (index, metadata) in relations.iter().enumerate() {
                metadata.validate().map_err(|e| {
                    ModelError::Relationship(format!(
                        "Validation failed for relationship '{}' in {}: {}",
                        metadata.name, kind, e
                    ))
                })?;

                if metadata.source != *kind {
                    return Err(ModelError::Relationship(format!(
                        "Relationship '{}' declares source {} but is registered on {}",
                        metadata.name, metadata.source, kind
                    )));
                }

                if !self.is_registered(metadata.target) {
                    return Err(ModelError::Relationship(format!(
                        "Relationship '{}' on {} targets unregistered {}",
                        metadata.name, kind, metadata.target
                    )));
                }

                if relations[..index]
                    .iter()
                    .any(|earlier| earlier.path_segment == metadata.path_segment)
                {
                    return Err(ModelError::Relationship(format!(
                        "Duplicate relationship '{}' on {}",
                        metadata.path_segment, kind
                    )));
                }

                if metadata.relationship_type == RelationshipType::BelongsTo && metadata.mappable {
                    tracing::debug!(
                        "Back-reference '{}' on {} is mappable and will join fetch plans",
                        metadata.name,
                        kind
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_is_valid() {
        let registry = RelationshipRegistry::standard();
        assert!(registry.validate_all().is_ok());
        assert_eq!(registry.kinds(), RecordKind::ALL.to_vec());
    }

    #[test]
    fn test_mappable_relations_of_person() {
        let registry = RelationshipRegistry::global();
        let names: Vec<&str> = registry
            .mappable_relations(RecordKind::Person)
            .map(|metadata| metadata.path_segment.as_str())
            .collect();
        assert_eq!(names, vec!["addresses", "contacts", "roles"]);
    }

    #[test]
    fn test_back_references_are_registered_but_not_mappable() {
        let registry = RelationshipRegistry::global();
        let person = registry.relation(RecordKind::Role, "person").unwrap();
        assert_eq!(person.target, RecordKind::Person);
        assert!(registry.mappable_relation(RecordKind::Role, "person").is_none());
        assert!(registry.mappable_relation(RecordKind::Role, "permissions").is_some());
    }

    #[test]
    fn test_find_inverse() {
        let registry = RelationshipRegistry::global();
        let inverse = registry.find_inverse(RecordKind::Person, "roles").unwrap();
        assert_eq!(inverse.source, RecordKind::Role);
        assert_eq!(inverse.name, "person");
    }

    #[test]
    fn test_attributes() {
        let registry = RelationshipRegistry::global();
        assert!(registry.has_attribute(RecordKind::Person, "firstName"));
        assert!(registry.has_attribute(RecordKind::Permission, "roleId"));
        assert!(!registry.has_attribute(RecordKind::Person, "password"));
    }

    #[test]
    fn test_relation_for_attribute() {
        let registry = RelationshipRegistry::global();
        let relation = registry.relation_for_attribute(RecordKind::Person, "addressCount").unwrap();
        assert_eq!(relation.path_segment, "addresses");
        let relation = registry.relation_for_attribute(RecordKind::Role, "permissionIds").unwrap();
        assert_eq!(relation.target, RecordKind::Permission);
        assert!(registry.relation_for_attribute(RecordKind::Person, "firstName").is_none());
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = RelationshipRegistry::new();
        registry.register_record::<Role>().unwrap();
        let duplicate = RelationshipMetadata::has_many(RecordKind::Role, "permissions", RecordKind::Permission);
        assert!(registry.register(duplicate).is_err());
    }

    #[test]
    fn test_validate_rejects_unregistered_target() {
        let mut registry = RelationshipRegistry::new();
        registry.register_record::<Role>().unwrap();
        // Permission and Person are never registered
        assert!(registry.validate_all().is_err());
    }

    #[test]
    fn test_stats() {
        let stats = RelationshipRegistry::standard().stats();
        assert_eq!(stats.total_kinds, 5);
        assert_eq!(stats.total_relationships, 8);
        assert_eq!(stats.mappable_relationships, 4);
        assert_eq!(stats.collection_relationships, 4);
    }
}
