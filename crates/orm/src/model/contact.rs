//! Contact record - owned by a person

use serde::{Deserialize, Serialize};

use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::core_trait::{Record, RecordKind, RecordRef};
use super::references::PersonRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    #[default]
    Personal,
    Business,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub id: Option<i64>,
    pub audit: AuditInfo,
    pub contact_type: ContactType,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    person: Option<PersonRef>,
}

impl Contact {
    pub fn new(contact_type: ContactType) -> Self {
        Self {
            contact_type,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_phone_number(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Owner back-reference
    pub fn person(&self) -> Option<PersonRef> {
        self.person
    }

    pub(crate) fn set_person(&mut self, person: Option<PersonRef>) {
        self.person = person;
    }
}

impl Record for Contact {
    fn kind() -> RecordKind {
        RecordKind::Contact
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
        vec![RelationshipMetadata::belongs_to(RecordKind::Contact, "person", RecordKind::Person)
            .with_inverse("contacts")]
    }

    fn attributes() -> &'static [&'static str] {
        &[
            "id",
            "contactType",
            "phoneNumber",
            "email",
            "createdDate",
            "modifiedDate",
            "createdBy",
            "modifiedBy",
            "personId",
        ]
    }

    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef::Contact(self)
    }
}
