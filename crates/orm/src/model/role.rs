//! Role record - owned by a person, owner of permissions

use crate::relationships::containers::HasMany;
use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::core_trait::{Record, RecordKind, RecordRef};
use super::references::{PersonRef, RoleRef};
use super::Permission;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Role {
    id: Option<i64>,
    pub audit: AuditInfo,
    pub name: String,
    permissions: HasMany<Permission>,
    person: Option<PersonRef>,
}

impl Role {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.set_primary_key(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Back-reference naming this role and its owner
    pub fn reference(&self) -> RoleRef {
        RoleRef::new(self.id, self.person)
    }

    pub fn permissions(&self) -> &HasMany<Permission> {
        &self.permissions
    }

    /// Owner back-reference
    pub fn person(&self) -> Option<PersonRef> {
        self.person
    }

    /// Link a permission to this role
    pub fn add_permission(&mut self, mut permission: Permission) {
        permission.set_role(Some(self.reference()));
        self.permissions.upsert(permission);
    }

    /// Unlink a permission, clearing its back-reference
    pub fn remove_permission(&mut self, id: i64) -> Option<Permission> {
        let mut permission = self.permissions.remove(id)?;
        permission.set_role(None);
        Some(permission)
    }

    pub(crate) fn set_person(&mut self, person: Option<PersonRef>) {
        self.person = person;
        self.refresh_back_references();
    }

    pub(crate) fn load_permissions(&mut self, permissions: Vec<Permission>) {
        self.permissions.set_loaded(Vec::new());
        for permission in permissions {
            self.add_permission(permission);
        }
    }

    pub(crate) fn take_permissions(&mut self) -> Vec<Permission> {
        self.permissions.take().unwrap_or_default()
    }

    fn refresh_back_references(&mut self) {
        let reference = Some(self.reference());
        for permission in self.permissions.iter_mut() {
            permission.set_role(reference);
        }
    }
}

impl Record for Role {
    fn kind() -> RecordKind {
        RecordKind::Role
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn set_primary_key(&mut self, key: i64) {
        self.id = Some(key);
        self.refresh_back_references();
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn relationships() -> Vec<RelationshipMetadata> {
        vec![
            RelationshipMetadata::has_many(RecordKind::Role, "permissions", RecordKind::Permission)
                .with_inverse("role")
                .with_summary_attributes("permissionIds", None)
                .with_description("Role permissions"),
            RelationshipMetadata::belongs_to(RecordKind::Role, "person", RecordKind::Person)
                .with_inverse("roles"),
        ]
    }

    fn attributes() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "createdDate",
            "modifiedDate",
            "createdBy",
            "modifiedBy",
            "permissionIds",
            "personId",
        ]
    }

    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef::Role(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_permission_clears_back_reference() {
        let mut role = Role::new("USER").with_id(10);
        role.add_permission(Permission::new("READ").with_id(100));
        role.add_permission(Permission::new("WRITE").with_id(101));

        let removed = role.remove_permission(100).unwrap();
        assert!(removed.role().is_none());
        assert_eq!(role.permissions().ids(), Some([101].into_iter().collect()));
    }

    #[test]
    fn test_detaching_role_clears_transitive_owner() {
        let mut role = Role::new("USER").with_id(10);
        role.set_person(Some(PersonRef::new(Some(1))));
        role.add_permission(Permission::new("READ").with_id(100));
        assert_eq!(
            role.permissions().find(100).unwrap().role().unwrap().person,
            Some(PersonRef::new(Some(1)))
        );

        role.set_person(None);
        let role_ref = role.permissions().find(100).unwrap().role().unwrap();
        assert_eq!(role_ref.id, Some(10));
        assert!(role_ref.person.is_none());
    }
}
