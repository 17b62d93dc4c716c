//! Error types for the projection layer
//!
//! Provides error handling for record lookup, relationship metadata,
//! configuration and serialization of projected DTOs.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for record and projection operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Record not found at the requested id
    NotFound(String),
    /// Relationship metadata is inconsistent
    Relationship(String),
    /// Configuration error
    Configuration(String),
    /// Record or request validation failed
    Validation(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound(what) => write!(f, "Record not found: {}", what),
            ModelError::Relationship(msg) => write!(f, "Relationship error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl ModelError {
    /// Build a not-found error for a record kind and id
    pub fn not_found(kind: impl fmt::Display, id: i64) -> Self {
        ModelError::NotFound(format!("{} with id {}", kind, id))
    }

    /// Returns true if this error is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

/// Configuration errors raised while loading or validating settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl From<ConfigError> for ModelError {
    fn from(err: ConfigError) -> Self {
        ModelError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ModelError::not_found("Person", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Record not found: Person with id 42");
    }

    #[test]
    fn test_config_error_converts() {
        let err: ModelError = ConfigError::InvalidValue {
            field: "max_depth".to_string(),
            value: "0".to_string(),
            expected: "integer between 1 and 16".to_string(),
        }
        .into();

        match err {
            ModelError::Configuration(msg) => assert!(msg.contains("max_depth")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ModelError = parse.unwrap_err().into();
        assert!(matches!(err, ModelError::Serialization(_)));
    }
}
