//! Permission record - owned by a role

use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::core_trait::{Record, RecordKind, RecordRef};
use super::references::RoleRef;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permission {
    pub id: Option<i64>,
    pub audit: AuditInfo,
    pub permission: String,
    role: Option<RoleRef>,
}

impl Permission {
    pub fn new(permission: &str) -> Self {
        Self {
            permission: permission.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Owner back-reference
    pub fn role(&self) -> Option<RoleRef> {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: Option<RoleRef>) {
        self.role = role;
    }
}

impl Record for Permission {
    fn kind() -> RecordKind {
        RecordKind::Permission
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn set_primary_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn relationships() -> Vec<RelationshipMetadata> {
        vec![RelationshipMetadata::belongs_to(RecordKind::Permission, "role", RecordKind::Role)
            .with_inverse("permissions")]
    }

    fn attributes() -> &'static [&'static str] {
        &[
            "id",
            "permission",
            "createdDate",
            "modifiedDate",
            "createdBy",
            "modifiedBy",
            "roleId",
        ]
    }

    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef::Permission(self)
    }
}
