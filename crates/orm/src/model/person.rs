//! Person record - the root owner of addresses, contacts and roles

use chrono::NaiveDate;

use crate::relationships::containers::HasMany;
use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::core_trait::{Record, RecordKind, RecordRef};
use super::references::PersonRef;
use super::{Address, Contact, Role};

/// A person with its owned addresses, contacts and roles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    id: Option<i64>,
    pub audit: AuditInfo,
    /// Write-only credential; never projected
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    addresses: HasMany<Address>,
    contacts: HasMany<Contact>,
    roles: HasMany<Role>,
}

impl Person {
    /// Create a new unsaved person
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
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

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Back-reference naming this person
    pub fn reference(&self) -> PersonRef {
        PersonRef::new(self.id)
    }

    pub fn addresses(&self) -> &HasMany<Address> {
        &self.addresses
    }

    pub fn contacts(&self) -> &HasMany<Contact> {
        &self.contacts
    }

    pub fn roles(&self) -> &HasMany<Role> {
        &self.roles
    }

    /// Link an address to this person
    pub fn add_address(&mut self, mut address: Address) {
        address.set_person(Some(self.reference()));
        self.addresses.upsert(address);
    }

    /// Unlink an address, clearing its back-reference
    pub fn remove_address(&mut self, id: i64) -> Option<Address> {
        let mut address = self.addresses.remove(id)?;
        address.set_person(None);
        Some(address)
    }

    /// Link a contact to this person
    pub fn add_contact(&mut self, mut contact: Contact) {
        contact.set_person(Some(self.reference()));
        self.contacts.upsert(contact);
    }

    /// Unlink a contact, clearing its back-reference
    pub fn remove_contact(&mut self, id: i64) -> Option<Contact> {
        let mut contact = self.contacts.remove(id)?;
        contact.set_person(None);
        Some(contact)
    }

    /// Link a role to this person
    pub fn add_role(&mut self, mut role: Role) {
        role.set_person(Some(self.reference()));
        self.roles.upsert(role);
    }

    /// Unlink a role, clearing its back-reference
    pub fn remove_role(&mut self, id: i64) -> Option<Role> {
        let mut role = self.roles.remove(id)?;
        role.set_person(None);
        Some(role)
    }

    /// Unlink every role
    pub fn clear_roles(&mut self) -> Vec<Role> {
        let mut roles = self.roles.drain();
        for role in roles.iter_mut() {
            role.set_person(None);
        }
        roles
    }

    /// Install fetched addresses, leaving the relation loaded
    pub(crate) fn load_addresses(&mut self, addresses: Vec<Address>) {
        self.addresses.set_loaded(Vec::new());
        for address in addresses {
            self.add_address(address);
        }
    }

    pub(crate) fn load_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts.set_loaded(Vec::new());
        for contact in contacts {
            self.add_contact(contact);
        }
    }

    pub(crate) fn load_roles(&mut self, roles: Vec<Role>) {
        self.roles.set_loaded(Vec::new());
        for role in roles {
            self.add_role(role);
        }
    }

    /// Detach the owned graph for persistence, leaving the relations not loaded
    pub(crate) fn take_children(&mut self) -> (Vec<Address>, Vec<Contact>, Vec<Role>) {
        (
            self.addresses.take().unwrap_or_default(),
            self.contacts.take().unwrap_or_default(),
            self.roles.take().unwrap_or_default(),
        )
    }

    fn refresh_back_references(&mut self) {
        let reference = Some(self.reference());
        for address in self.addresses.iter_mut() {
            address.set_person(reference);
        }
        for contact in self.contacts.iter_mut() {
            contact.set_person(reference);
        }
        for role in self.roles.iter_mut() {
            role.set_person(reference);
        }
    }
}

impl Record for Person {
    fn kind() -> RecordKind {
        RecordKind::Person
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
            RelationshipMetadata::has_many(RecordKind::Person, "addresses", RecordKind::Address)
                .with_inverse("person")
                .with_summary_attributes("addressIds", Some("addressCount"))
                .with_description("Person addresses"),
            RelationshipMetadata::has_many(RecordKind::Person, "contacts", RecordKind::Contact)
                .with_inverse("person")
                .with_summary_attributes("contactIds", Some("contactCount"))
                .with_description("Person contacts"),
            RelationshipMetadata::has_many(RecordKind::Person, "roles", RecordKind::Role)
                .with_inverse("person")
                .with_summary_attributes("roleIds", Some("roleCount"))
                .with_description("Roles for current person"),
        ]
    }

    fn attributes() -> &'static [&'static str] {
        &[
            "id",
            "firstName",
            "lastName",
            "birthday",
            "createdDate",
            "modifiedDate",
            "createdBy",
            "modifiedBy",
            "addressIds",
            "contactIds",
            "roleIds",
            "addressCount",
            "contactCount",
            "roleCount",
        ]
    }

    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef::Person(self)
    }
}
