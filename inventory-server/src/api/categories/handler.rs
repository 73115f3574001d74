//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{Category, CategoryInput};
use shared::response::Paginated;

use crate::api::query::ListQuery;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/categories - list categories
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Category>>>> {
    let page = state
        .backend()
        .get_with_query("/categories", &query.params())
        .await?;
    Ok(ok(page))
}

/// GET /api/categories/{id} - fetch one category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Category>>> {
    let category = state
        .backend()
        .get(&format!("/categories/{}", id))
        .await?;
    Ok(ok(category))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<AppResponse<Category>>> {
    let category = state.backend().post("/categories", &input).await?;
    Ok(ok(category))
}

/// PUT /api/categories/{id} - update a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<AppResponse<Category>>> {
    let category = state
        .backend()
        .put(&format!("/categories/{}", id), &input)
        .await?;
    Ok(ok(category))
}

/// DELETE /api/categories/{id} - delete a category
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .backend()
        .delete(&format!("/categories/{}", id))
        .await?;
    Ok(ok(()))
}
