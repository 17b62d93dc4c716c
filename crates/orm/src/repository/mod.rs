//! Repository - the persistence collaborator
//!
//! Repositories fetch records by id or in bulk while honouring a
//! [`FetchPlan`]: relations the plan covers come back loaded, everything
//! else stays not loaded.

use async_trait::async_trait;

use crate::error::ModelResult;
use crate::loading::FetchPlan;
use crate::model::Record;

pub mod memory;

pub use memory::{MemoryStore, StoreStats, StoredRecord};

/// Async access to persisted records of one type
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Fetch one record with the relations named by `plan`
    async fn find_by_id(&self, id: i64, plan: &FetchPlan) -> ModelResult<Option<R>>;

    /// Fetch the records with the given ids, in request order
    ///
    /// Ids that are not stored are skipped and repeated ids yield one record.
    async fn find_by_ids(&self, ids: &[i64], plan: &FetchPlan) -> ModelResult<Vec<R>>;

    /// Fetch every record with the relations named by `plan`, ordered by id
    async fn find_all(&self, plan: &FetchPlan) -> ModelResult<Vec<R>>;

    async fn exists_by_id(&self, id: i64) -> ModelResult<bool>;

    /// Number of stored records
    async fn count(&self) -> ModelResult<usize>;
}
