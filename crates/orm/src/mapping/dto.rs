//! Output records
//!
//! Every field except `id` is optional and omitted from JSON when absent,
//! so a projection only carries what its options asked for. Passwords have
//! no output field at all.

use std::collections::BTreeSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AddressType, ContactType};

/// Audit block flattened into every output record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

impl AuditDto {
    pub fn is_empty(&self) -> bool {
        self.created_date.is_none()
            && self.modified_date.is_none()
            && self.created_by.is_none()
            && self.modified_by.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(flatten)]
    pub audit: AuditDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_ids: Option<BTreeSet<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_ids: Option<BTreeSet<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<BTreeSet<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<ContactDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleDto>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub audit: AuditDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: Option<i64>,
    pub contact_type: ContactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub audit: AuditDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: Option<i64>,
    pub name: String,
    #[serde(flatten)]
    pub audit: AuditDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_ids: Option<BTreeSet<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDto {
    pub id: Option<i64>,
    pub permission: String,
    #[serde(flatten)]
    pub audit: AuditDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

/// Flat person listing with relation counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummaryDto {
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub address_count: usize,
    pub contact_count: usize,
    pub role_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_omitted() {
        let dto = PersonDto {
            id: Some(1),
            first_name: Some("John".to_string()),
            role_ids: Some(BTreeSet::from([10])),
            ..PersonDto::default()
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({"id": 1, "firstName": "John", "roleIds": [10]})
        );
    }

    #[test]
    fn test_address_type_uses_type_key() {
        let dto = AddressDto {
            id: Some(5),
            address_type: AddressType::Business,
            ..AddressDto::default()
        };
        assert_eq!(serde_json::to_value(&dto).unwrap(), json!({"id": 5, "type": "BUSINESS"}));
    }

    #[test]
    fn test_audit_is_flattened() {
        let dto = PermissionDto {
            id: Some(100),
            permission: "READ_PRIVILEGES".to_string(),
            audit: AuditDto {
                created_by: Some("seeder".to_string()),
                ..AuditDto::default()
            },
            role_id: None,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["createdBy"], "seeder");
        assert!(value.get("roleId").is_none());

        let back: PermissionDto = serde_json::from_value(value).unwrap();
        assert_eq!(back, dto);
    }
}
