use std::sync::Arc;

use tracing::{info, instrument};

use models::resource::{self, NewResource, Resource, ResourcePatch};

use crate::errors::ServiceError;
use crate::resource::store::ResourceStore;

use common::pagination::Pagination;

/// Application service encapsulating resource business rules.
///
/// Owns the absence-to-`NotFound` translation so the transport layer never
/// sees a raw `None`, and runs payload validation before touching the store.
pub struct ResourceService<S: ResourceStore> {
    store: Arc<S>,
}

impl<S: ResourceStore> ResourceService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub async fn get_by_id(&self, id: u64) -> Result<Resource, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found_by_id(resource::ENTITY_NAME, id))
    }

    /// Full snapshot; an empty catalogue is a valid, non-error result.
    pub async fn list_all(&self) -> Result<Vec<Resource>, ServiceError> {
        self.store.list().await
    }

    /// Snapshot narrowed to one page when pagination was requested.
    pub async fn list_page(&self, page: Option<Pagination>) -> Result<Vec<Resource>, ServiceError> {
        let all = self.store.list().await?;
        Ok(match page {
            Some(p) => p.apply(all),
            None => all,
        })
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewResource) -> Result<Resource, ServiceError> {
        input.validate()?;
        let created = self.store.insert(input).await?;
        info!(id = created.id, "resource_created");
        Ok(created)
    }

    /// Partial update; only fields present in the patch are replaced. The
    /// merge itself runs inside the store so concurrent updates on the same
    /// id cannot drop each other's fields.
    pub async fn update(&self, id: u64, patch: ResourcePatch) -> Result<Resource, ServiceError> {
        patch.validate()?;
        if patch.is_empty() {
            // Nothing to write; still reports NotFound for an absent id.
            return self.get_by_id(id).await;
        }
        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found_by_id(resource::ENTITY_NAME, id))
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        if self.store.delete(id).await? {
            info!(id, "resource_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found_by_id(resource::ENTITY_NAME, id))
        }
    }
}
