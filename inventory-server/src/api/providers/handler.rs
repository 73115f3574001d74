//! Provider API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{Provider, ProviderInput};
use shared::response::Paginated;

use crate::api::query::ListQuery;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/providers - list providers
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Provider>>>> {
    let page = state
        .backend()
        .get_with_query("/providers", &query.params())
        .await?;
    Ok(ok(page))
}

/// GET /api/providers/{id} - fetch one provider
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Provider>>> {
    let provider = state
        .backend()
        .get(&format!("/providers/{}", id))
        .await?;
    Ok(ok(provider))
}

/// POST /api/providers - create a provider
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProviderInput>,
) -> AppResult<Json<AppResponse<Provider>>> {
    let provider = state.backend().post("/providers", &input).await?;
    Ok(ok(provider))
}

/// PUT /api/providers/{id} - update a provider
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<ProviderInput>,
) -> AppResult<Json<AppResponse<Provider>>> {
    let provider = state
        .backend()
        .put(&format!("/providers/{}", id), &input)
        .await?;
    Ok(ok(provider))
}

/// DELETE /api/providers/{id} - delete a provider
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .backend()
        .delete(&format!("/providers/{}", id))
        .await?;
    Ok(ok(()))
}
