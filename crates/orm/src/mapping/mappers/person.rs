use crate::mapping::context::TraversalContext;
use crate::mapping::dto::{PersonDto, PersonSummaryDto};
use crate::mapping::options::MappingOptions;
use crate::mapping::utils::{audit_fields, nested, relation_count, relation_ids, safe_count};
use crate::model::{Person, Record};
use super::{AddressMapper, ContactMapper, EntityMapper, RoleMapper};

#[derive(Debug, Clone, Copy, Default)]
pub struct PersonMapper;

impl PersonMapper {
    /// Flat listing entry with relation counts; unloaded relations count as zero
    pub fn to_summary_dto(&self, person: &Person) -> PersonSummaryDto {
        PersonSummaryDto {
            id: person.id(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birthday: person.birthday,
            address_count: safe_count(person.addresses()),
            contact_count: safe_count(person.contacts()),
            role_count: safe_count(person.roles()),
        }
    }
}

impl EntityMapper for PersonMapper {
    type Entity = Person;
    type Dto = PersonDto;

    fn to_dto_in(&self, person: &Person, options: &MappingOptions, ctx: &TraversalContext) -> PersonDto {
        let ctx = ctx.enter(person.key());

        PersonDto {
            id: person.id(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birthday: person.birthday,
            audit: audit_fields(&person.audit, options, &ctx),
            address_ids: relation_ids(person.addresses(), options, &ctx, "addresses", "addressIds"),
            contact_ids: relation_ids(person.contacts(), options, &ctx, "contacts", "contactIds"),
            role_ids: relation_ids(person.roles(), options, &ctx, "roles", "roleIds"),
            address_count: relation_count(person.addresses(), options, &ctx, "addresses", "addressCount"),
            contact_count: relation_count(person.contacts(), options, &ctx, "contacts", "contactCount"),
            role_count: relation_count(person.roles(), options, &ctx, "roles", "roleCount"),
            addresses: nested(&AddressMapper, person.addresses(), options, &ctx, "addresses"),
            contacts: nested(&ContactMapper, person.contacts(), options, &ctx, "contacts"),
            roles: nested(&RoleMapper, person.roles(), options, &ctx, "roles"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use chrono::{NaiveDate, Utc};
    use crate::mapping::MappingLevel;
    use crate::model::{Address, AddressType, AuditInfo, Contact, ContactType, Permission, Role};

    fn john() -> Person {
        let mut role = Role::new("USER").with_id(10);
        role.add_permission(Permission::new("READ_PRIVILEGES").with_id(100));

        let mut person = Person::new("John", "Doe")
            .with_id(1)
            .with_password("password123")
            .with_birthday(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        person.audit = AuditInfo::created("seeder", Utc::now());
        person.add_address(Address::new(AddressType::Local).with_id(5).with_street("123 Main St", "12345"));
        person.add_contact(Contact::new(ContactType::Personal).with_id(7).with_email("john.doe@example.com"));
        person.add_role(role);
        person
    }

    #[test]
    fn test_minimal_projection() {
        let dto = PersonMapper.to_simple_dto(&john());
        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.first_name.as_deref(), Some("John"));
        assert!(dto.audit.is_empty());
        assert!(dto.role_ids.is_none());
        assert!(dto.roles.is_none());
    }

    #[test]
    fn test_password_never_projected() {
        let json = serde_json::to_string(&PersonMapper.to_dto(&john(), &MappingOptions::complete())).unwrap();
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_summary_projection() {
        let dto = PersonMapper.to_dto(&john(), &MappingOptions::summary());
        assert!(dto.audit.created_by.is_some());
        assert_eq!(dto.role_ids, Some(BTreeSet::from([10])));
        assert_eq!(dto.address_ids, Some(BTreeSet::from([5])));
        assert_eq!(dto.contact_count, Some(1));
        assert!(dto.roles.is_none());
        assert!(dto.addresses.is_none());
    }

    #[test]
    fn test_complete_projection_suppresses_back_references() {
        let dto = PersonMapper.to_dto(&john(), &MappingOptions::complete());
        let roles = dto.roles.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].person_id, None);
        assert_eq!(roles[0].permission_ids, Some(BTreeSet::from([100])));

        let permissions = roles[0].permissions.as_ref().unwrap();
        assert_eq!(permissions[0].permission, "READ_PRIVILEGES");
        assert_eq!(permissions[0].role_id, None);

        let addresses = dto.addresses.unwrap();
        assert_eq!(addresses[0].person_id, None);
    }

    #[test]
    fn test_explicit_nested_path_at_minimal() {
        let options = MappingOptions::with_fields(["roles.permissions"]);
        let dto = PersonMapper.to_dto(&john(), &options);
        assert!(dto.addresses.is_none());
        assert!(dto.address_ids.is_none());
        assert!(dto.audit.is_empty());

        let roles = dto.roles.unwrap();
        assert_eq!(roles[0].permissions.as_ref().unwrap()[0].id, Some(100));
        assert!(roles[0].audit.is_empty());
    }

    #[test]
    fn test_unloaded_relations_are_absent() {
        let person = Person::new("Jane", "Roe").with_id(2);
        let dto = PersonMapper.to_dto(&person, &MappingOptions::of(MappingLevel::Complete));
        assert!(dto.roles.is_none());
        assert!(dto.role_ids.is_none());
        assert!(dto.role_count.is_none());
    }

    #[test]
    fn test_summary_dto_counts() {
        let summary = PersonMapper.to_summary_dto(&john());
        assert_eq!(summary.address_count, 1);
        assert_eq!(summary.role_count, 1);
        assert_eq!(PersonMapper.to_summary_dto(&Person::new("Jane", "Roe")).role_count, 0);
    }

    #[test]
    fn test_mapping_does_not_mutate() {
        let person = john();
        let before = person.clone();
        let _ = PersonMapper.to_dto(&person, &MappingOptions::complete());
        assert_eq!(person, before);
    }
}
