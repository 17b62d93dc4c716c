//! Address record - owned by a person

use serde::{Deserialize, Serialize};

use crate::relationships::metadata::RelationshipMetadata;
use super::audit::AuditInfo;
use super::core_trait::{Record, RecordKind, RecordRef};
use super::references::PersonRef;

/// Kind of postal address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    #[default]
    Local,
    Permanent,
    Business,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub id: Option<i64>,
    pub audit: AuditInfo,
    pub address_type: AddressType,
    pub street: Option<String>,
    pub post_zip_code: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    person: Option<PersonRef>,
}

impl Address {
    pub fn new(address_type: AddressType) -> Self {
        Self {
            address_type,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_street(mut self, street: &str, post_zip_code: &str) -> Self {
        self.street = Some(street.to_string());
        self.post_zip_code = Some(post_zip_code.to_string());
        self
    }

    pub fn with_locality(mut self, city: &str, province: &str, country: &str) -> Self {
        self.city = Some(city.to_string());
        self.province = Some(province.to_string());
        self.country = Some(country.to_string());
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

impl Record for Address {
    fn kind() -> RecordKind {
        RecordKind::Address
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
        vec![RelationshipMetadata::belongs_to(RecordKind::Address, "person", RecordKind::Person)
            .with_inverse("addresses")]
    }

    fn attributes() -> &'static [&'static str] {
        &[
            "id",
            "type",
            "street",
            "postZipCode",
            "province",
            "city",
            "country",
            "createdDate",
            "modifiedDate",
            "createdBy",
            "modifiedBy",
            "personId",
        ]
    }

    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef::Address(self)
    }
}
