//! Traversal context - the records already on the current projection stack

use crate::loading::paths::join_path;
use crate::model::RecordKey;

/// Ordered stack of records being projected plus the dotted path from the root
///
/// Contexts are values: entering a record or descending into a relation
/// returns a new context and leaves the parent untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalContext {
    stack: Vec<RecordKey>,
    prefix: String,
}

impl TraversalContext {
    /// Context at the root of a projection
    pub fn root() -> Self {
        Self::default()
    }

    /// Push the record about to be projected
    pub fn enter(&self, key: RecordKey) -> Self {
        let mut next = self.clone();
        next.stack.push(key);
        next
    }

    /// Extend the path prefix with a relation segment
    pub fn descend(&self, segment: &str) -> Self {
        let mut next = self.clone();
        next.prefix = join_path(&self.prefix, segment);
        next
    }

    /// Dotted path of `field` relative to the projection root
    pub fn path(&self, field: &str) -> String {
        join_path(&self.prefix, field)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether a saved record is already on the stack
    pub fn contains(&self, key: RecordKey) -> bool {
        key.id.is_some() && self.stack.contains(&key)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[RecordKey] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;

    #[test]
    fn test_paths_follow_descent() {
        let root = TraversalContext::root();
        assert_eq!(root.path("roles"), "roles");

        let roles = root.descend("roles");
        assert_eq!(roles.path("permissions"), "roles.permissions");
        assert_eq!(roles.descend("permissions").prefix(), "roles.permissions");
        assert_eq!(root.prefix(), "");
    }

    #[test]
    fn test_contains_only_saved_records() {
        let ctx = TraversalContext::root()
            .enter(RecordKey::new(RecordKind::Person, Some(1)))
            .enter(RecordKey::new(RecordKind::Role, None));

        assert_eq!(ctx.depth(), 2);
        assert!(ctx.contains(RecordKey::new(RecordKind::Person, Some(1))));
        assert!(!ctx.contains(RecordKey::new(RecordKind::Person, Some(2))));
        assert!(!ctx.contains(RecordKey::new(RecordKind::Role, None)));
    }
}
