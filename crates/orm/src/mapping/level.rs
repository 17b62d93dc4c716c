//! Mapping levels - coarse, cumulative output detail

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output detail level; each level is a strict superset of the previous one
///
/// - `Minimal`: the record's own scalar fields and id
/// - `Basic`: plus creation/modification audit metadata
/// - `Summary`: plus identifiers and counts of directly related records
/// - `Complete`: plus fully nested related records, recursively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingLevel {
    Minimal,
    Basic,
    Summary,
    Complete,
}

impl MappingLevel {
    pub const ALL: [MappingLevel; 4] = [
        MappingLevel::Minimal,
        MappingLevel::Basic,
        MappingLevel::Summary,
        MappingLevel::Complete,
    ];

    /// Ordinal position of the level
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Check whether this level implies `other`
    pub fn is_at_least(self, other: MappingLevel) -> bool {
        self >= other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MappingLevel::Minimal => "MINIMAL",
            MappingLevel::Basic => "BASIC",
            MappingLevel::Summary => "SUMMARY",
            MappingLevel::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for MappingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MappingLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MINIMAL" => Ok(MappingLevel::Minimal),
            "BASIC" => Ok(MappingLevel::Basic),
            "SUMMARY" => Ok(MappingLevel::Summary),
            "COMPLETE" => Ok(MappingLevel::Complete),
            _ => Err(ConfigError::InvalidValue {
                field: "level".to_string(),
                value: s.to_string(),
                expected: "MINIMAL, BASIC, SUMMARY or COMPLETE".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordinal() {
        assert!(MappingLevel::Complete.is_at_least(MappingLevel::Summary));
        assert!(MappingLevel::Summary.is_at_least(MappingLevel::Summary));
        assert!(!MappingLevel::Basic.is_at_least(MappingLevel::Summary));
        let ordinals: Vec<u8> = MappingLevel::ALL.iter().map(|level| level.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("summary".parse::<MappingLevel>().unwrap(), MappingLevel::Summary);
        assert_eq!(" Complete ".parse::<MappingLevel>().unwrap(), MappingLevel::Complete);
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = "FULL".parse::<MappingLevel>().unwrap_err();
        assert!(err.to_string().contains("MINIMAL, BASIC, SUMMARY or COMPLETE"));
    }

    #[test]
    fn test_serializes_as_screaming_case() {
        assert_eq!(serde_json::to_string(&MappingLevel::Basic).unwrap(), "\"BASIC\"");
    }
}
