//! Pharmacy API Handlers
//!
//! The dispensation workflow: build a cart, then submit it to the backend as
//! one dispensation. The cart lives in gateway memory; the backend only sees
//! the final submission and enforces the actual stock rules.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Dispensation, DispensationItem, DispensationRequest};
use shared::response::Paginated;

use crate::AppError;
use crate::api::pharmacy::cart::Cart;
use crate::api::query::ListQuery;
use crate::auth::Session;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/pharmacy/dispensations - dispensation history
pub async fn list_dispensations(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Dispensation>>>> {
    let page = state
        .backend()
        .get_with_query("/dispensations", &query.params())
        .await?;
    Ok(ok(page))
}

/// GET /api/pharmacy/cart - current user's cart
pub async fn get_cart(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
) -> Json<AppResponse<Cart>> {
    ok(state.carts().get(&session.id))
}

/// POST /api/pharmacy/cart/items - add an item to the cart
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
    Json(item): Json<DispensationItem>,
) -> AppResult<Json<AppResponse<Cart>>> {
    if item.quantity == 0 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(ok(state.carts().add_item(&session.id, item)))
}

/// DELETE /api/pharmacy/cart/items/{product_id} - drop a product from the cart
pub async fn remove_item(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
    Path(product_id): Path<String>,
) -> Json<AppResponse<Cart>> {
    ok(state.carts().remove_product(&session.id, &product_id))
}

/// DELETE /api/pharmacy/cart - discard the cart
pub async fn clear_cart(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
) -> Json<AppResponse<()>> {
    state.carts().clear(&session.id);
    ok(())
}

/// Submission payload: where the cart contents go
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispenseRequest {
    pub destination: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/pharmacy/dispense - submit the cart as a dispensation
///
/// The cart is cleared only after the backend accepts the dispensation, so a
/// rejected submission can be corrected and retried.
pub async fn dispense(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
    Json(req): Json<DispenseRequest>,
) -> AppResult<Json<AppResponse<Dispensation>>> {
    let cart = state.carts().get(&session.id);
    if cart.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }
    if req.destination.trim().is_empty() {
        return Err(AppError::validation("Destination is required"));
    }

    let request = DispensationRequest {
        items: cart.items,
        destination: req.destination,
        notes: req.notes,
    };

    let dispensation: Dispensation = state.backend().post("/dispensations", &request).await?;

    state.carts().clear(&session.id);
    tracing::info!(
        user = %session.username,
        dispensation = %dispensation.id,
        "dispensation submitted"
    );

    Ok(ok(dispensation))
}
