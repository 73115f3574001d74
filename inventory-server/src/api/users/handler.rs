//! User administration Handlers
//!
//! User management is the most sensitive module: only roles with explicit
//! `users` grants reach these handlers (admin, plus read-only auditors).

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{UserAccount, UserAccountInput};
use shared::response::Paginated;

use crate::api::query::ListQuery;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/users - list user accounts
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<UserAccount>>>> {
    let page = state
        .backend()
        .get_with_query("/users", &query.params())
        .await?;
    Ok(ok(page))
}

/// GET /api/users/{id} - fetch one account
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<UserAccount>>> {
    let user = state.backend().get(&format!("/users/{}", id)).await?;
    Ok(ok(user))
}

/// POST /api/users - create an account
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<UserAccountInput>,
) -> AppResult<Json<AppResponse<UserAccount>>> {
    let user = state.backend().post("/users", &input).await?;
    Ok(ok(user))
}

/// PUT /api/users/{id} - update an account
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<UserAccountInput>,
) -> AppResult<Json<AppResponse<UserAccount>>> {
    let user = state
        .backend()
        .put(&format!("/users/{}", id), &input)
        .await?;
    Ok(ok(user))
}

/// DELETE /api/users/{id} - delete an account
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.backend().delete(&format!("/users/{}", id)).await?;
    Ok(ok(()))
}
