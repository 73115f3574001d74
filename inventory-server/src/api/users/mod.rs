//! User administration module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{Action, Module, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", user_routes())
}

fn user_routes() -> Router<ServerState> {
    let view = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(
            Module::Users,
            Action::View,
        )));

    let create = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(
            Module::Users,
            Action::Create,
        )));

    let edit = Router::new()
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Module::Users,
            Action::Edit,
        )));

    let remove = Router::new()
        .route("/{id}", delete(handler::remove))
        .layer(middleware::from_fn(require_permission(
            Module::Users,
            Action::Delete,
        )));

    view.merge(create).merge(edit).merge(remove)
}
