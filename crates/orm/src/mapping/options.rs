//! Mapping options - the per-request projection policy

use std::collections::BTreeSet;

use super::level::MappingLevel;

/// Immutable per-request policy: a level, explicit attribute paths, or both
///
/// Without fields the options are in level mode and the effective level
/// defaults to `Complete`. With fields the options are in attribute mode:
/// the effective level defaults to `Minimal` and every listed path adds
/// itself (and its ancestors) on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOptions {
    level: Option<MappingLevel>,
    fields: Option<BTreeSet<String>>,
}

impl MappingOptions {
    pub fn new(level: Option<MappingLevel>, fields: Option<BTreeSet<String>>) -> Self {
        Self { level, fields }
    }

    /// Level-mode options
    pub fn of(level: MappingLevel) -> Self {
        Self::new(Some(level), None)
    }

    pub fn minimal() -> Self {
        Self::of(MappingLevel::Minimal)
    }

    pub fn basic() -> Self {
        Self::of(MappingLevel::Basic)
    }

    pub fn summary() -> Self {
        Self::of(MappingLevel::Summary)
    }

    pub fn complete() -> Self {
        Self::of(MappingLevel::Complete)
    }

    /// Attribute-mode options over the given dotted paths
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(None, Some(fields.into_iter().map(Into::into).collect()))
    }

    /// Set the level, keeping any fields
    pub fn with_level(mut self, level: MappingLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn level(&self) -> Option<MappingLevel> {
        self.level
    }

    pub fn fields(&self) -> Option<&BTreeSet<String>> {
        self.fields.as_ref()
    }

    /// Whether the caller selected explicit attribute paths
    pub fn is_attribute_mode(&self) -> bool {
        self.fields.is_some()
    }

    /// Level used for level-based decisions
    pub fn effective_level(&self) -> MappingLevel {
        match (self.level, &self.fields) {
            (Some(level), _) => level,
            (None, Some(_)) => MappingLevel::Minimal,
            (None, None) => MappingLevel::Complete,
        }
    }

    pub fn is_at_least(&self, level: MappingLevel) -> bool {
        self.effective_level().is_at_least(level)
    }

    /// True when fields are unset or empty (wildcard) or `path` is listed
    pub fn includes(&self, path: &str) -> bool {
        match &self.fields {
            None => true,
            Some(fields) => fields.is_empty() || fields.contains(path),
        }
    }

    /// True when a listed path equals `path` or descends from it
    pub fn explicitly_includes(&self, path: &str) -> bool {
        let Some(fields) = &self.fields else {
            return false;
        };
        fields.iter().any(|field| {
            field == path
                || (field.len() > path.len()
                    && field.starts_with(path)
                    && field.as_bytes()[path.len()] == b'.')
        })
    }

    /// The level already implies inclusion, or the path is explicitly requested
    pub fn level_or_includes(&self, path: &str, required: MappingLevel) -> bool {
        self.is_at_least(required) || self.explicitly_includes(path)
    }

    /// Keep only the fields accepted by `keep`
    pub fn retain_fields<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        if let Some(fields) = self.fields.as_mut() {
            fields.retain(|field| keep(field));
        }
        self
    }
}

impl From<MappingLevel> for MappingOptions {
    fn from(level: MappingLevel) -> Self {
        Self::of(level)
    }
}
