//! In-memory store
//!
//! Records live in normalized tables keyed by id: each row holds the
//! record's own fields plus the key of its owner, never its children.
//! Fetching assembles the requested graph from those rows according to
//! the fetch plan and counts every relation it loads.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::loading::{join_path, FetchPlan};
use crate::model::{Address, Contact, Permission, Person, Record, RecordKind, Role};
use super::Repository;

const DEFAULT_ACTOR: &str = "system";

/// One table of rows plus its id sequence
#[derive(Debug, Default)]
struct Table<R> {
    rows: DashMap<i64, R>,
    sequence: AtomicI64,
}

impl<R: Record> Table<R> {
    /// Assign an id to an unsaved record, or advance the sequence past a given one
    ///
    /// A given id that is already stored is rejected.
    fn assign(&self, record: &mut R) -> ModelResult<i64> {
        match record.primary_key() {
            Some(id) if self.rows.contains_key(&id) => Err(ModelError::Validation(format!(
                "{} already exists",
                record.key()
            ))),
            Some(id) => {
                self.sequence.fetch_max(id, Ordering::SeqCst);
                Ok(id)
            }
            None => {
                let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                record.set_primary_key(id);
                Ok(id)
            }
        }
    }

    fn get(&self, id: i64) -> Option<R> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn select<F>(&self, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        let mut rows: Vec<R> = self
            .rows
            .iter()
            .filter(|row| predicate(row.value()))
            .map(|row| row.value().clone())
            .collect();
        rows.sort_by_key(|row| row.primary_key());
        rows
    }
}

/// Snapshot of store activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Root records fetched by id or in bulk
    pub record_fetches: u64,
    /// Relation collections loaded while assembling graphs
    pub relation_loads: u64,
    /// Relation loads per dotted path
    pub loads_by_path: BTreeMap<String, u64>,
}

impl StoreStats {
    pub fn loads_of(&self, path: &str) -> u64 {
        self.loads_by_path.get(path).copied().unwrap_or(0)
    }
}

/// Thread-safe in-memory persistence for the five record types
#[derive(Debug)]
pub struct MemoryStore {
    persons: Table<Person>,
    addresses: Table<Address>,
    contacts: Table<Contact>,
    roles: Table<Role>,
    permissions: Table<Permission>,
    actor: String,
    record_fetches: AtomicU64,
    relation_loads: AtomicU64,
    loads_by_path: DashMap<String, u64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            persons: Table::default(),
            addresses: Table::default(),
            contacts: Table::default(),
            roles: Table::default(),
            permissions: Table::default(),
            actor: DEFAULT_ACTOR.to_string(),
            record_fetches: AtomicU64::new(0),
            relation_loads: AtomicU64::new(0),
            loads_by_path: DashMap::new(),
        }
    }

    /// Name stamped into the audit block of inserted records
    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = actor.to_string();
        self
    }

    /// Persist a person with any loaded addresses, contacts and roles
    pub fn insert_person(&self, mut person: Person) -> ModelResult<Person> {
        let (addresses, contacts, roles) = person.take_children();
        self.persons.assign(&mut person)?;
        person.audit.stamp_created(&self.actor, Utc::now());
        self.store_row(&self.persons, &person);

        let reference = Some(person.reference());
        let mut stored_addresses = Vec::with_capacity(addresses.len());
        for mut address in addresses {
            address.set_person(reference);
            stored_addresses.push(self.insert_address(address)?);
        }
        let mut stored_contacts = Vec::with_capacity(contacts.len());
        for mut contact in contacts {
            contact.set_person(reference);
            stored_contacts.push(self.insert_contact(contact)?);
        }
        let mut stored_roles = Vec::with_capacity(roles.len());
        for mut role in roles {
            role.set_person(reference);
            stored_roles.push(self.insert_role(role)?);
        }

        person.load_addresses(stored_addresses);
        person.load_contacts(stored_contacts);
        person.load_roles(stored_roles);
        tracing::debug!("Inserted {}", person.key());
        Ok(person)
    }

    /// Persist an address under the person it references
    pub fn insert_address(&self, mut address: Address) -> ModelResult<Address> {
        self.ensure_person(address.person().and_then(|person| person.id), RecordKind::Address)?;
        self.addresses.assign(&mut address)?;
        address.audit.stamp_created(&self.actor, Utc::now());
        self.store_row(&self.addresses, &address);
        Ok(address)
    }

    /// Persist a contact under the person it references
    pub fn insert_contact(&self, mut contact: Contact) -> ModelResult<Contact> {
        self.ensure_person(contact.person().and_then(|person| person.id), RecordKind::Contact)?;
        self.contacts.assign(&mut contact)?;
        contact.audit.stamp_created(&self.actor, Utc::now());
        self.store_row(&self.contacts, &contact);
        Ok(contact)
    }

    /// Persist a role with any loaded permissions
    pub fn insert_role(&self, mut role: Role) -> ModelResult<Role> {
        self.ensure_person(role.person().and_then(|person| person.id), RecordKind::Role)?;
        let permissions = role.take_permissions();
        self.roles.assign(&mut role)?;
        role.audit.stamp_created(&self.actor, Utc::now());
        self.store_row(&self.roles, &role);

        let reference = Some(role.reference());
        let mut stored = Vec::with_capacity(permissions.len());
        for mut permission in permissions {
            permission.set_role(reference);
            stored.push(self.insert_permission(permission)?);
        }
        role.load_permissions(stored);
        Ok(role)
    }

    /// Persist a permission under the role it references
    pub fn insert_permission(&self, mut permission: Permission) -> ModelResult<Permission> {
        if let Some(role_id) = permission.role().and_then(|role| role.id) {
            if !self.roles.contains(role_id) {
                return Err(ModelError::Validation(format!(
                    "Permission references missing Role#{}",
                    role_id
                )));
            }
        }
        self.permissions.assign(&mut permission)?;
        permission.audit.stamp_created(&self.actor, Utc::now());
        self.store_row(&self.permissions, &permission);
        Ok(permission)
    }

    fn ensure_person(&self, person_id: Option<i64>, child: RecordKind) -> ModelResult<()> {
        match person_id {
            Some(id) if !self.persons.contains(id) => Err(ModelError::Validation(format!(
                "{} references missing Person#{}",
                child, id
            ))),
            _ => Ok(()),
        }
    }

    /// Store the row form of a record: own fields and owner key only
    fn store_row<R: StoredRecord>(&self, table: &Table<R>, record: &R) {
        if let Some(id) = record.primary_key() {
            table.rows.insert(id, record.to_row());
        }
    }

    /// Number of rows of a kind
    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Person => self.persons.rows.len(),
            RecordKind::Address => self.addresses.rows.len(),
            RecordKind::Contact => self.contacts.rows.len(),
            RecordKind::Role => self.roles.rows.len(),
            RecordKind::Permission => self.permissions.rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        RecordKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Snapshot of activity counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            record_fetches: self.record_fetches.load(Ordering::Relaxed),
            relation_loads: self.relation_loads.load(Ordering::Relaxed),
            loads_by_path: self
                .loads_by_path
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        }
    }

    pub fn reset_stats(&self) {
        self.record_fetches.store(0, Ordering::Relaxed);
        self.relation_loads.store(0, Ordering::Relaxed);
        self.loads_by_path.clear();
    }

    fn record_fetch(&self) {
        self.record_fetches.fetch_add(1, Ordering::Relaxed);
    }

    fn relation_load(&self, path: &str) {
        self.relation_loads.fetch_add(1, Ordering::Relaxed);
        *self.loads_by_path.entry(path.to_string()).or_insert(0) += 1;
        tracing::trace!("Loading relation '{}'", path);
    }

    fn hydrate_person(&self, person: &mut Person, plan: &FetchPlan, prefix: &str) {
        let Some(id) = person.id() else {
            return;
        };
        let owned_by = |owner: Option<i64>| owner == Some(id);

        let path = join_path(prefix, "addresses");
        if plan.loads(&path) {
            self.relation_load(&path);
            person.load_addresses(self.addresses.select(|a| owned_by(a.person().and_then(|p| p.id))));
        }

        let path = join_path(prefix, "contacts");
        if plan.loads(&path) {
            self.relation_load(&path);
            person.load_contacts(self.contacts.select(|c| owned_by(c.person().and_then(|p| p.id))));
        }

        let path = join_path(prefix, "roles");
        if plan.loads(&path) {
            self.relation_load(&path);
            let mut roles = self.roles.select(|r| owned_by(r.person().and_then(|p| p.id)));
            for role in roles.iter_mut() {
                self.hydrate_role(role, plan, &path);
            }
            person.load_roles(roles);
        }
    }

    fn hydrate_role(&self, role: &mut Role, plan: &FetchPlan, prefix: &str) {
        let Some(id) = role.id() else {
            return;
        };

        let path = join_path(prefix, "permissions");
        if plan.loads(&path) {
            self.relation_load(&path);
            role.load_permissions(
                self.permissions
                    .select(|p| p.role().and_then(|role| role.id) == Some(id)),
            );
        }
    }
}

/// Record types the in-memory store can persist and assemble
pub trait StoredRecord: Record {
    /// Row form of the record: relations stripped, owner key kept
    fn to_row(&self) -> Self;

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self>;

    fn exists(store: &MemoryStore, id: i64) -> bool;

    fn fetch_all(store: &MemoryStore) -> Vec<Self>;

    /// Load the relations of a fetched row covered by `plan`
    fn hydrate(&mut self, _store: &MemoryStore, _plan: &FetchPlan) {}
}

impl StoredRecord for Person {
    fn to_row(&self) -> Self {
        let mut row = self.clone();
        let _ = row.take_children();
        row
    }

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self> {
        store.persons.get(id)
    }

    fn exists(store: &MemoryStore, id: i64) -> bool {
        store.persons.contains(id)
    }

    fn fetch_all(store: &MemoryStore) -> Vec<Self> {
        store.persons.select(|_| true)
    }

    fn hydrate(&mut self, store: &MemoryStore, plan: &FetchPlan) {
        store.hydrate_person(self, plan, "");
    }
}

impl StoredRecord for Address {
    fn to_row(&self) -> Self {
        self.clone()
    }

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self> {
        store.addresses.get(id)
    }

    fn exists(store: &MemoryStore, id: i64) -> bool {
        store.addresses.contains(id)
    }

    fn fetch_all(store: &MemoryStore) -> Vec<Self> {
        store.addresses.select(|_| true)
    }
}

impl StoredRecord for Contact {
    fn to_row(&self) -> Self {
        self.clone()
    }

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self> {
        store.contacts.get(id)
    }

    fn exists(store: &MemoryStore, id: i64) -> bool {
        store.contacts.contains(id)
    }

    fn fetch_all(store: &MemoryStore) -> Vec<Self> {
        store.contacts.select(|_| true)
    }
}

impl StoredRecord for Role {
    fn to_row(&self) -> Self {
        let mut row = self.clone();
        let _ = row.take_permissions();
        row
    }

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self> {
        store.roles.get(id)
    }

    fn exists(store: &MemoryStore, id: i64) -> bool {
        store.roles.contains(id)
    }

    fn fetch_all(store: &MemoryStore) -> Vec<Self> {
        store.roles.select(|_| true)
    }

    fn hydrate(&mut self, store: &MemoryStore, plan: &FetchPlan) {
        store.hydrate_role(self, plan, "");
    }
}

impl StoredRecord for Permission {
    fn to_row(&self) -> Self {
        self.clone()
    }

    fn fetch(store: &MemoryStore, id: i64) -> Option<Self> {
        store.permissions.get(id)
    }

    fn exists(store: &MemoryStore, id: i64) -> bool {
        store.permissions.contains(id)
    }

    fn fetch_all(store: &MemoryStore) -> Vec<Self> {
        store.permissions.select(|_| true)
    }
}

#[async_trait]
impl<R: StoredRecord> Repository<R> for MemoryStore {
    async fn find_by_id(&self, id: i64, plan: &FetchPlan) -> ModelResult<Option<R>> {
        self.record_fetch();
        let record = R::fetch(self, id).map(|mut record| {
            record.hydrate(self, plan);
            record
        });
        Ok(record)
    }

    async fn find_by_ids(&self, ids: &[i64], plan: &FetchPlan) -> ModelResult<Vec<R>> {
        self.record_fetch();
        let mut seen = BTreeSet::new();
        let mut records = Vec::with_capacity(ids.len());
        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            if let Some(mut record) = R::fetch(self, id) {
                record.hydrate(self, plan);
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn find_all(&self, plan: &FetchPlan) -> ModelResult<Vec<R>> {
        self.record_fetch();
        let mut records = R::fetch_all(self);
        for record in records.iter_mut() {
            record.hydrate(self, plan);
        }
        Ok(records)
    }

    async fn exists_by_id(&self, id: i64) -> ModelResult<bool> {
        Ok(R::exists(self, id))
    }

    async fn count(&self) -> ModelResult<usize> {
        Ok(self.len(R::kind()))
    }
}
