//! Pharmacy API module
//!
//! Cart reads require `pharmacy:view`; everything that moves toward an
//! actual dispensation requires `pharmacy:create`.

mod handler;

pub mod cart;

pub use cart::{Cart, CartStore};

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{Action, Module, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pharmacy", pharmacy_routes())
}

fn pharmacy_routes() -> Router<ServerState> {
    let view = Router::new()
        .route("/dispensations", get(handler::list_dispensations))
        .route("/cart", get(handler::get_cart))
        .layer(middleware::from_fn(require_permission(
            Module::Pharmacy,
            Action::View,
        )));

    let create = Router::new()
        .route("/cart/items", post(handler::add_item))
        .route("/cart/items/{product_id}", delete(handler::remove_item))
        .route("/cart", delete(handler::clear_cart))
        .route("/dispense", post(handler::dispense))
        .layer(middleware::from_fn(require_permission(
            Module::Pharmacy,
            Action::Create,
        )));

    view.merge(create)
}
