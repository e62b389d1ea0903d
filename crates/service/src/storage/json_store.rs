use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};

use models::resource::{NewResource, Resource, ResourcePatch};

use crate::errors::ServiceError;
use crate::resource::store::ResourceStore;

fn initial_next_id() -> u64 { 1 }

/// On-disk shape: the records plus the id counter, so ids survive restarts
/// and are never handed out twice.
#[derive(Debug, Serialize, Deserialize)]
struct StoreState {
    #[serde(default = "initial_next_id")]
    next_id: u64,
    #[serde(default)]
    items: BTreeMap<u64, Resource>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self { next_id: initial_next_id(), items: BTreeMap::new() }
    }
}

/// JSON file-backed resource store.
///
/// Keeps the full map in memory behind an `RwLock` and rewrites the file
/// after every successful mutation. Reads share the read guard; every write
/// holds the write guard through the merge and the file save, which gives
/// the per-id read-modify-write atomicity `update` relies on.
#[derive(Clone)]
pub struct JsonResourceStore {
    inner: Arc<RwLock<StoreState>>,
    file_path: PathBuf,
}

impl JsonResourceStore {
    /// Initialize the store from a path. Creates the file with an empty
    /// state if missing; an unreadable or corrupt file starts empty.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let state: StoreState = match fs::read(&file_path).await {
            Ok(bytes) => {
                let mut state: StoreState = serde_json::from_slice(&bytes).unwrap_or_default();
                // Guard against hand-edited files: the counter must stay
                // ahead of every existing id.
                let max_id = state.items.keys().next_back().copied();
                if let Some(max_id) = max_id {
                    state.next_id = state.next_id.max(max_id + 1);
                }
                state
            }
            Err(_) => {
                let empty = StoreState::default();
                let data = serde_json::to_vec(&empty)
                    .map_err(|e| ServiceError::Store(e.to_string()))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| ServiceError::Store(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(state)), file_path }))
    }

    async fn save(&self, state: &StoreState) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(state).map_err(|e| ServiceError::Store(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ResourceStore for JsonResourceStore {
    async fn get(&self, id: u64) -> Result<Option<Resource>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.items.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Resource>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.items.values().cloned().collect())
    }

    async fn insert(&self, input: NewResource) -> Result<Resource, ServiceError> {
        let mut state = self.inner.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let resource = input.into_resource(id);
        state.items.insert(id, resource.clone());
        if let Err(e) = self.save(&state).await {
            // Keep memory and file consistent; the counter is never rewound.
            state.items.remove(&id);
            return Err(e);
        }
        Ok(resource)
    }

    async fn update(&self, id: u64, patch: ResourcePatch) -> Result<Option<Resource>, ServiceError> {
        let mut state = self.inner.write().await;
        let previous = match state.items.get(&id) {
            Some(existing) => existing.clone(),
            None => return Ok(None),
        };
        let mut updated = previous.clone();
        updated.apply(patch);
        state.items.insert(id, updated.clone());
        if let Err(e) = self.save(&state).await {
            state.items.insert(id, previous);
            return Err(e);
        }
        Ok(Some(updated))
    }

    async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        let removed = match state.items.remove(&id) {
            Some(removed) => removed,
            None => return Ok(false),
        };
        if let Err(e) = self.save(&state).await {
            state.items.insert(id, removed);
            return Err(e);
        }
        Ok(true)
    }
}
