use async_trait::async_trait;
use models::resource::{NewResource, Resource, ResourcePatch};

use crate::errors::ServiceError;

/// Keyed persistence abstraction for one entity type.
///
/// Absence is a valid result (`Ok(None)` / `Ok(false)`), never an error;
/// `ServiceError::Store` is reserved for a failing backing medium.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Option<Resource>, ServiceError>;
    /// Snapshot of all records, ascending id order.
    async fn list(&self) -> Result<Vec<Resource>, ServiceError>;
    /// Assigns the next id; ids are never reused after deletion.
    async fn insert(&self, input: NewResource) -> Result<Resource, ServiceError>;
    /// Merges `patch` into the stored record atomically with respect to any
    /// other read or write on the same id. `Ok(None)` if absent; no upsert.
    async fn update(&self, id: u64, patch: ResourcePatch) -> Result<Option<Resource>, ServiceError>;
    /// Idempotent; returns whether a record existed and was removed.
    async fn delete(&self, id: u64) -> Result<bool, ServiceError>;
}
