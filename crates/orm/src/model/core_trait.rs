//! Core Record Trait - Base definition for persisted records
//!
//! Defines the record kinds known to the projection layer, the [`Record`]
//! trait with primary key and audit access, and the explicit per-type
//! declaration of relations and projectable attributes that feeds the
//! relationship registry.

use std::fmt::{self, Debug};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::{Address, Contact, Permission, Person, Role};

/// The persisted record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Person,
    Address,
    Contact,
    Role,
    Permission,
}

impl RecordKind {
    /// All record kinds in declaration order
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Person,
        RecordKind::Address,
        RecordKind::Contact,
        RecordKind::Role,
        RecordKind::Permission,
    ];

    /// Type name of the record
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Person => "Person",
            RecordKind::Address => "Address",
            RecordKind::Contact => "Contact",
            RecordKind::Role => "Role",
            RecordKind::Permission => "Permission",
        }
    }

    /// Storage table for the record
    pub fn table_name(self) -> &'static str {
        match self {
            RecordKind::Person => "persons",
            RecordKind::Address => "addresses",
            RecordKind::Contact => "contacts",
            RecordKind::Role => "roles",
            RecordKind::Permission => "permissions",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" | "persons" | "people" => Ok(RecordKind::Person),
            "address" | "addresses" => Ok(RecordKind::Address),
            "contact" | "contacts" => Ok(RecordKind::Contact),
            "role" | "roles" => Ok(RecordKind::Role),
            "permission" | "permissions" => Ok(RecordKind::Permission),
            _ => Err(ConfigError::InvalidValue {
                field: "record".to_string(),
                value: s.to_string(),
                expected: "person, address, contact, role or permission".to_string(),
            }),
        }
    }
}

/// Identity of a record: its kind plus primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub kind: RecordKind,
    pub id: Option<i64>,
}

impl RecordKey {
    pub fn new(kind: RecordKind, id: Option<i64>) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{}", self.kind, id),
            None => write!(f, "{}#unsaved", self.kind),
        }
    }
}

/// Borrowed view over any record, used where code switches on the concrete kind
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Person(&'a Person),
    Address(&'a Address),
    Contact(&'a Contact),
    Role(&'a Role),
    Permission(&'a Permission),
}

impl RecordRef<'_> {
    /// Kind of the referenced record
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Person(_) => RecordKind::Person,
            RecordRef::Address(_) => RecordKind::Address,
            RecordRef::Contact(_) => RecordKind::Contact,
            RecordRef::Role(_) => RecordKind::Role,
            RecordRef::Permission(_) => RecordKind::Permission,
        }
    }

    /// Identity of the referenced record
    pub fn key(&self) -> RecordKey {
        let id = match self {
            RecordRef::Person(r) => r.id(),
            RecordRef::Address(r) => r.id,
            RecordRef::Contact(r) => r.id,
            RecordRef::Role(r) => r.id(),
            RecordRef::Permission(r) => r.id,
        };
        RecordKey::new(self.kind(), id)
    }
}

/// Core trait for persisted records
pub trait Record: Send + Sync + Debug + Clone + 'static {
    /// Kind of this record type
    fn kind() -> RecordKind;

    /// Table name for this record type
    fn table_name() -> &'static str {
        Self::kind().table_name()
    }

    /// Get the primary key value for this record instance
    fn primary_key(&self) -> Option<i64>;

    /// Set the primary key value, refreshing back-references held by children
    fn set_primary_key(&mut self, key: i64);

    /// Audit metadata of this record
    fn audit(&self) -> &AuditInfo;

    /// Mutable audit metadata of this record
    fn audit_mut(&mut self) -> &mut AuditInfo;

    /// Relations declared by this record type
    fn relationships() -> Vec<RelationshipMetadata>;

    /// Projectable attribute names (wire names) of this record type
    fn attributes() -> &'static [&'static str];

    /// Borrow as a kind-tagged view
    fn as_record_ref(&self) -> RecordRef<'_>;

    /// Identity of this record
    fn key(&self) -> RecordKey {
        RecordKey::new(Self::kind(), self.primary_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_parsing() {
        assert_eq!("Person".parse::<RecordKind>().unwrap(), RecordKind::Person);
        assert_eq!("roles".parse::<RecordKind>().unwrap(), RecordKind::Role);
        assert_eq!(" permission ".parse::<RecordKind>().unwrap(), RecordKind::Permission);
        assert!("department".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_record_key_display() {
        assert_eq!(RecordKey::new(RecordKind::Role, Some(10)).to_string(), "Role#10");
        assert_eq!(RecordKey::new(RecordKind::Address, None).to_string(), "Address#unsaved");
    }
}
