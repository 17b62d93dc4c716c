//! Back-references held by child records
//!
//! A back-reference names the owner by key. It never owns or points at the
//! owner, so a record tree stays acyclic in memory.

use super::core_trait::{RecordKey, RecordKind};

/// Back-reference to an owning [`Person`](super::Person)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonRef {
    pub id: Option<i64>,
}

impl PersonRef {
    pub fn new(id: Option<i64>) -> Self {
        Self { id }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(RecordKind::Person, self.id)
    }
}

/// Back-reference to an owning [`Role`](super::Role), including the role's own owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleRef {
    pub id: Option<i64>,
    pub person: Option<PersonRef>,
}

impl RoleRef {
    pub fn new(id: Option<i64>, person: Option<PersonRef>) -> Self {
        Self { id, person }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(RecordKind::Role, self.id)
    }
}
