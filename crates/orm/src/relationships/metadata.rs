//! Relationship Metadata System - Core metadata definitions for relationships

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::RecordKind;

/// Defines the type of relationship between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// One-to-many relationship (hasMany)
    HasMany,
    /// Many-to-one back-reference (belongsTo)
    BelongsTo,
}

impl RelationshipType {
    /// Returns true if this relationship returns a collection
    pub fn is_collection(self) -> bool {
        matches!(self, Self::HasMany)
    }
}

/// Description of one declared relation field of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// The type of relationship
    pub relationship_type: RelationshipType,

    /// Name of the relation field on the source record
    pub name: String,

    /// Segment used for this relation in dotted attribute paths
    pub path_segment: String,

    /// Record type declaring the relation
    pub source: RecordKind,

    /// Record type the relation points at
    pub target: RecordKind,

    /// Whether the relation can be projected and eagerly fetched
    pub mappable: bool,

    /// Inverse relationship name on the target
    pub inverse: Option<String>,

    /// Source attribute holding the identifiers of the related records
    pub ids_attribute: Option<String>,

    /// Source attribute holding the number of related records
    pub count_attribute: Option<String>,

    /// Human readable description
    pub description: Option<String>,
}

impl RelationshipMetadata {
    /// Create a new RelationshipMetadata instance
    pub fn new(
        relationship_type: RelationshipType,
        source: RecordKind,
        name: &str,
        target: RecordKind,
    ) -> Self {
        Self {
            relationship_type,
            name: name.to_string(),
            path_segment: name.to_string(),
            source,
            target,
            mappable: relationship_type.is_collection(),
            inverse: None,
            ids_attribute: None,
            count_attribute: None,
            description: None,
        }
    }

    /// Mappable owner-side collection
    pub fn has_many(source: RecordKind, name: &str, target: RecordKind) -> Self {
        Self::new(RelationshipType::HasMany, source, name, target)
    }

    /// Child-side back-reference; documented but not mappable by default
    pub fn belongs_to(source: RecordKind, name: &str, target: RecordKind) -> Self {
        Self::new(RelationshipType::BelongsTo, source, name, target)
    }

    /// Use a path segment different from the field name
    pub fn with_path_segment(mut self, segment: &str) -> Self {
        self.path_segment = segment.to_string();
        self
    }

    /// Override whether the relation participates in projections and fetch plans
    pub fn with_mappable(mut self, mappable: bool) -> Self {
        self.mappable = mappable;
        self
    }

    /// Set the inverse relationship name
    pub fn with_inverse(mut self, inverse: &str) -> Self {
        self.inverse = Some(inverse.to_string());
        self
    }

    /// Declare the summary attributes derived from this relation
    pub fn with_summary_attributes(mut self, ids: &str, count: Option<&str>) -> Self {
        self.ids_attribute = Some(ids.to_string());
        self.count_attribute = count.map(str::to_string);
        self
    }

    /// Whether `attribute` is derived from the contents of this relation
    pub fn derives(&self, attribute: &str) -> bool {
        self.ids_attribute.as_deref() == Some(attribute)
            || self.count_attribute.as_deref() == Some(attribute)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Returns true if this relationship returns a collection
    pub fn is_collection(&self) -> bool {
        self.relationship_type.is_collection()
    }

    /// Validate the relationship metadata for consistency
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.is_empty() {
            return Err(ModelError::Relationship(format!(
                "Relationship on {} must have a name",
                self.source
            )));
        }

        if self.path_segment.is_empty() || self.path_segment.contains('.') {
            return Err(ModelError::Relationship(format!(
                "Relationship '{}' on {} has invalid path segment '{}'",
                self.name, self.source, self.path_segment
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_many_is_mappable_collection() {
        let metadata = RelationshipMetadata::has_many(RecordKind::Person, "roles", RecordKind::Role);
        assert!(metadata.is_collection());
        assert!(metadata.mappable);
        assert_eq!(metadata.path_segment, "roles");
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn test_summary_attributes() {
        let metadata = RelationshipMetadata::has_many(RecordKind::Person, "roles", RecordKind::Role)
            .with_summary_attributes("roleIds", Some("roleCount"));
        assert!(metadata.derives("roleIds"));
        assert!(metadata.derives("roleCount"));
        assert!(!metadata.derives("roles"));
    }

    #[test]
    fn test_belongs_to_is_not_mappable_by_default() {
        let metadata = RelationshipMetadata::belongs_to(RecordKind::Role, "person", RecordKind::Person);
        assert!(!metadata.is_collection());
        assert!(!metadata.mappable);
        assert!(metadata.with_mappable(true).mappable);
    }

    #[test]
    fn test_dotted_segment_is_invalid() {
        let metadata = RelationshipMetadata::has_many(RecordKind::Person, "roles", RecordKind::Role)
            .with_path_segment("roles.all");
        assert!(matches!(metadata.validate(), Err(ModelError::Relationship(_))));
    }
}
