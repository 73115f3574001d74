//! Shared types for the hospital inventory gateway
//!
//! Common types used across crates: API request/response DTOs, inventory
//! models, and the unified response envelope. These shapes mirror what the
//! upstream inventory backend exchanges with the gateway and what browser
//! clients receive.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserProfile};
pub use response::{ApiResponse, Paginated};
