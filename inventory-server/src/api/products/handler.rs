//! Product API Handlers
//!
//! Proxies to the backend's `/products` resource. Permission checks happen
//! in the router layers; by the time a handler runs the session already
//! holds the required grant.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{Product, ProductInput};
use shared::response::Paginated;

use crate::api::query::ListQuery;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/products - list products
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Product>>>> {
    let page = state
        .backend()
        .get_with_query("/products", &query.params())
        .await?;
    Ok(ok(page))
}

/// GET /api/products/{id} - fetch one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .backend()
        .get(&format!("/products/{}", id))
        .await?;
    Ok(ok(product))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.backend().post("/products", &input).await?;
    Ok(ok(product))
}

/// PUT /api/products/{id} - update a product
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .backend()
        .put(&format!("/products/{}", id), &input)
        .await?;
    Ok(ok(product))
}

/// DELETE /api/products/{id} - delete a product
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.backend().delete(&format!("/products/{}", id)).await?;
    Ok(ok(()))
}
