//! Audit metadata shared by every record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire names of the audit attributes
pub const AUDIT_ATTRIBUTES: [&str; 4] = ["createdDate", "modifiedDate", "createdBy", "modifiedBy"];

/// Creation and modification metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl AuditInfo {
    /// Audit block for a record created by `by` at `at`
    pub fn created(by: &str, at: DateTime<Utc>) -> Self {
        Self {
            created_date: Some(at),
            modified_date: Some(at),
            created_by: Some(by.to_string()),
            modified_by: Some(by.to_string()),
        }
    }

    /// Stamp creation metadata if the record has none yet
    pub fn stamp_created(&mut self, by: &str, at: DateTime<Utc>) {
        if self.created_date.is_none() {
            self.created_date = Some(at);
            self.created_by = Some(by.to_string());
        }
        self.stamp_modified(by, at);
    }

    /// Stamp modification metadata
    pub fn stamp_modified(&mut self, by: &str, at: DateTime<Utc>) {
        self.modified_date = Some(at);
        self.modified_by = Some(by.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.created_date.is_none()
            && self.modified_date.is_none()
            && self.created_by.is_none()
            && self.modified_by.is_none()
    }
}
