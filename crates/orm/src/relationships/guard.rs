//! Ancestor guard - cycle checks over child back-references
//!
//! Children name their owners by key, so walking "up" a record never
//! touches the owner itself. The guard answers whether such a walk reaches
//! a given kind, and whether it leads back into the records currently on a
//! projection stack.

use crate::mapping::context::TraversalContext;
use crate::model::{RecordKey, RecordKind, RecordRef};

/// Whether walking up the back-references of `record` reaches a record of `kind`
///
/// Permissions reach a person through their role's owner.
pub fn has_ancestor_of_type(record: RecordRef<'_>, kind: RecordKind) -> bool {
    ancestors(record).iter().any(|ancestor| ancestor.kind == kind)
}

/// Owner chain of `record`, nearest first
pub fn ancestors(record: RecordRef<'_>) -> Vec<RecordKey> {
    match record {
        RecordRef::Person(_) => Vec::new(),
        RecordRef::Address(address) => address.person().map(|p| p.key()).into_iter().collect(),
        RecordRef::Contact(contact) => contact.person().map(|p| p.key()).into_iter().collect(),
        RecordRef::Role(role) => role.person().map(|p| p.key()).into_iter().collect(),
        RecordRef::Permission(permission) => match permission.role() {
            Some(role) => {
                let mut chain = vec![role.key()];
                chain.extend(role.person.map(|p| p.key()));
                chain
            }
            None => Vec::new(),
        },
    }
}

/// Whether any owner of `record` is already being projected in `ctx`
pub fn leads_back(record: RecordRef<'_>, ctx: &TraversalContext) -> bool {
    ancestors(record).into_iter().any(|ancestor| ctx.contains(ancestor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, AddressType, Permission, Person, Record, Role};

    fn owned_permission() -> (Person, Permission) {
        let mut role = Role::new("USER").with_id(10);
        role.add_permission(Permission::new("READ_PRIVILEGES").with_id(100));
        let mut person = Person::new("John", "Doe").with_id(1);
        person.add_role(role);
        let permission = person.roles().get().unwrap()[0].permissions().get().unwrap()[0].clone();
        (person, permission)
    }

    #[test]
    fn test_person_has_no_ancestors() {
        let person = Person::new("John", "Doe").with_id(1);
        assert!(!has_ancestor_of_type(person.as_record_ref(), RecordKind::Person));
        assert!(ancestors(person.as_record_ref()).is_empty());
    }

    #[test]
    fn test_permission_reaches_person_through_role() {
        let (_, permission) = owned_permission();
        assert!(has_ancestor_of_type(permission.as_record_ref(), RecordKind::Role));
        assert!(has_ancestor_of_type(permission.as_record_ref(), RecordKind::Person));
        assert_eq!(
            ancestors(permission.as_record_ref()),
            vec![
                RecordKey::new(RecordKind::Role, Some(10)),
                RecordKey::new(RecordKind::Person, Some(1)),
            ]
        );
    }

    #[test]
    fn test_detached_child_has_no_ancestor() {
        let address = Address::new(AddressType::Local).with_id(5);
        assert!(!has_ancestor_of_type(address.as_record_ref(), RecordKind::Person));
    }

    #[test]
    fn test_leads_back_only_into_records_on_the_stack() {
        let (person, permission) = owned_permission();
        let standalone = TraversalContext::root().enter(permission.key());
        assert!(!leads_back(permission.as_record_ref(), &standalone));

        let nested = TraversalContext::root()
            .enter(person.key())
            .descend("roles")
            .enter(RecordKey::new(RecordKind::Role, Some(10)));
        assert!(leads_back(permission.as_record_ref(), &nested));
    }
}
