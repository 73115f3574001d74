//! Client-related types shared between the gateway and its clients
//!
//! Common request/response types used in API communication. These types are
//! shared between the gateway, the inventory backend, and browser clients,
//! so field names follow the backend's camelCase convention.

use serde::{Deserialize, Serialize};

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data returned to browser clients
///
/// The secret credential travels only in the HttpOnly cookie; this body
/// carries the advisory profile snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
}

/// User profile as reported by the inventory backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_reset_password: Option<bool>,
}

/// Backend login response
///
/// Internal to the gateway/backend exchange. The gateway keeps only the
/// verified profile; it authenticates its own proxy calls with the service
/// credential, so any per-user token the backend includes here is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendLoginResponse {
    pub user: UserProfile,
}

/// Current session info echoed by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user: UserProfile,
    /// Modules the session may reach, in canonical order
    pub accessible_modules: Vec<String>,
    pub is_admin: bool,
    pub is_read_only: bool,
}
