use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::pagination::Pagination;
use models::resource::{NewResource, Resource, ResourcePatch};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// Absent params mean "no pagination": return the full snapshot.
    fn pagination(&self) -> Option<Pagination> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let defaults = Pagination::default();
        Some(Pagination {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        })
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Resource>>, JsonApiError> {
    let list = state.resources.list_page(q.pagination()).await?;
    info!(count = list.len(), "list resources");
    Ok(Json(list))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Resource>, JsonApiError> {
    let resource = state.resources.get_by_id(id).await?;
    Ok(Json(resource))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewResource>,
) -> Result<(StatusCode, Json<Resource>), JsonApiError> {
    let created = state.resources.create(input).await?;
    info!(id = created.id, title = %created.title, "created resource");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    ApiJson(patch): ApiJson<ResourcePatch>,
) -> Result<Json<Resource>, JsonApiError> {
    let updated = state.resources.update(id, patch).await?;
    info!(id = updated.id, "updated resource");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, JsonApiError> {
    state.resources.delete(id).await?;
    info!(id, "deleted resource");
    Ok(StatusCode::NO_CONTENT)
}
