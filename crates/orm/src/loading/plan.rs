//! Fetch plans - which relation paths a single fetch must load

use std::collections::BTreeSet;
use std::fmt;
use serde::Serialize;

use crate::model::RecordKind;
use super::paths::{is_strict_prefix, reduce_paths};

/// Reduced set of dotted relation paths rooted at one record kind
///
/// No listed path is a strict prefix of another; ancestors of a listed
/// path are implied and still loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchPlan {
    root: RecordKind,
    paths: BTreeSet<String>,
}

impl FetchPlan {
    /// Plan that loads no relations
    pub fn empty(root: RecordKind) -> Self {
        Self {
            root,
            paths: BTreeSet::new(),
        }
    }

    /// Build a plan from arbitrary relation paths, reducing them
    pub fn from_paths<I>(root: RecordKind, paths: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            root,
            paths: reduce_paths(paths),
        }
    }

    pub fn root(&self) -> RecordKind {
        self.root
    }

    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `path` is listed as-is
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Whether a fetch under this plan loads `path`
    pub fn loads(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|listed| listed == path || is_strict_prefix(path, listed))
    }
}

impl fmt::Display for FetchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<&str> = self.iter().collect();
        write!(f, "{}[{}]", self.root, paths.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paths_reduces() {
        let plan = FetchPlan::from_paths(
            RecordKind::Person,
            vec!["roles".to_string(), "roles.permissions".to_string()],
        );
        assert_eq!(plan.len(), 1);
        assert!(plan.contains("roles.permissions"));
        assert!(!plan.contains("roles"));
    }

    #[test]
    fn test_loads_implies_ancestors() {
        let plan = FetchPlan::from_paths(RecordKind::Person, vec!["roles.permissions".to_string()]);
        assert!(plan.loads("roles"));
        assert!(plan.loads("roles.permissions"));
        assert!(!plan.loads("addresses"));
        assert!(!plan.loads("role"));
    }

    #[test]
    fn test_display() {
        let plan = FetchPlan::from_paths(
            RecordKind::Person,
            vec!["addresses".to_string(), "roles.permissions".to_string()],
        );
        assert_eq!(plan.to_string(), "Person[addresses, roles.permissions]");
        assert_eq!(FetchPlan::empty(RecordKind::Role).to_string(), "Role[]");
    }
}
