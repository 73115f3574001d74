//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check (public)
//! - [`auth`] - login, logout, session echo
//! - [`products`] - product catalog proxy
//! - [`categories`] - category proxy
//! - [`providers`] - provider proxy
//! - [`users`] - user administration proxy
//! - [`pharmacy`] - dispensation cart and submission

pub mod query;

pub mod auth;
pub mod health;

pub mod categories;
pub mod pharmacy;
pub mod products;
pub mod providers;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
