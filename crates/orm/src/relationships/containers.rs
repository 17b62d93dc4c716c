//! Relationship Containers - Loading-state aware storage for has-many relations
//!
//! A relation that the fetch plan did not cover stays [`NotLoaded`]; reading it
//! yields nothing instead of triggering another query.
//!
//! [`NotLoaded`]: RelationshipLoadingState::NotLoaded

use std::collections::BTreeSet;

use crate::model::Record;

/// Represents the loading state of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationshipLoadingState {
    /// Not fetched by the persistence collaborator
    #[default]
    NotLoaded,
    /// Fetched (possibly empty)
    Loaded,
}

/// Collection-valued relation with identity-unique members
#[derive(Debug, Clone, PartialEq)]
pub struct HasMany<T> {
    state: RelationshipLoadingState,
    items: Vec<T>,
}

impl<T> Default for HasMany<T> {
    fn default() -> Self {
        Self {
            state: RelationshipLoadingState::NotLoaded,
            items: Vec::new(),
        }
    }
}

impl<T: Record> HasMany<T> {
    /// Create a relation that has not been loaded
    pub fn not_loaded() -> Self {
        Self::default()
    }

    /// Create a loaded relation
    pub fn loaded(items: Vec<T>) -> Self {
        let mut relation = Self::default();
        relation.set_loaded(items);
        relation
    }

    /// Check if the relation is loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, RelationshipLoadingState::Loaded)
    }

    /// Get the loaded members if available
    pub fn get(&self) -> Option<&[T]> {
        if self.is_loaded() {
            Some(&self.items)
        } else {
            None
        }
    }

    /// Iterate loaded members; empty when not loaded
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of loaded members
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Primary keys of the loaded members, if loaded
    pub fn ids(&self) -> Option<BTreeSet<i64>> {
        self.get()
            .map(|items| items.iter().filter_map(Record::primary_key).collect())
    }

    /// Find a member by primary key
    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.primary_key() == Some(id))
    }

    /// Replace the members and mark the relation loaded, dropping duplicate identities
    pub fn set_loaded(&mut self, items: Vec<T>) {
        self.items.clear();
        self.state = RelationshipLoadingState::Loaded;
        for item in items {
            self.upsert(item);
        }
    }

    /// Take the loaded members, leaving the relation not loaded
    pub fn take(&mut self) -> Option<Vec<T>> {
        if self.is_loaded() {
            self.state = RelationshipLoadingState::NotLoaded;
            Some(std::mem::take(&mut self.items))
        } else {
            None
        }
    }

    /// Insert a member, replacing any member with the same primary key
    pub(crate) fn upsert(&mut self, item: T) -> Option<T> {
        self.state = RelationshipLoadingState::Loaded;
        if let Some(id) = item.primary_key() {
            if let Some(slot) = self.items.iter_mut().find(|existing| existing.primary_key() == Some(id)) {
                return Some(std::mem::replace(slot, item));
            }
        }
        self.items.push(item);
        None
    }

    /// Remove a member by primary key
    pub(crate) fn remove(&mut self, id: i64) -> Option<T> {
        let position = self.items.iter().position(|item| item.primary_key() == Some(id))?;
        Some(self.items.remove(position))
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub(crate) fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Permission;

    fn permission(id: i64, name: &str) -> Permission {
        let mut permission = Permission::new(name);
        permission.id = Some(id);
        permission
    }

    #[test]
    fn test_default_is_not_loaded() {
        let relation: HasMany<Permission> = HasMany::not_loaded();
        assert!(!relation.is_loaded());
        assert!(relation.get().is_none());
        assert!(relation.ids().is_none());
        assert_eq!(relation.iter().count(), 0);
    }

    #[test]
    fn test_loaded_empty_is_distinct_from_not_loaded() {
        let relation: HasMany<Permission> = HasMany::loaded(Vec::new());
        assert!(relation.is_loaded());
        assert_eq!(relation.get().map(|items| items.len()), Some(0));
        assert_eq!(relation.ids(), Some(BTreeSet::new()));
    }

    #[test]
    fn test_upsert_keeps_identity_unique() {
        let mut relation = HasMany::loaded(vec![permission(1, "READ"), permission(2, "WRITE")]);
        let replaced = relation.upsert(permission(1, "READ_ALL"));

        assert_eq!(replaced.map(|p| p.permission), Some("READ".to_string()));
        assert_eq!(relation.len(), 2);
        assert_eq!(relation.find(1).map(|p| p.permission.as_str()), Some("READ_ALL"));
    }

    #[test]
    fn test_set_loaded_drops_duplicates() {
        let relation = HasMany::loaded(vec![permission(5, "A"), permission(5, "B")]);
        assert_eq!(relation.len(), 1);
        assert_eq!(relation.ids(), Some(BTreeSet::from([5])));
    }

    #[test]
    fn test_take_resets_state() {
        let mut relation = HasMany::loaded(vec![permission(1, "READ")]);
        let taken = relation.take().unwrap();
        assert_eq!(taken.len(), 1);
        assert!(!relation.is_loaded());
        assert!(relation.take().is_none());
    }
}
