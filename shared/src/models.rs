//! Inventory domain models
//!
//! Mirrors of the inventory backend's resource shapes. The gateway does not
//! own these records; it validates access and forwards them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pharmaceutical product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub provider_id: String,
    /// Units currently in stock across all batches
    pub stock: i64,
    pub unit: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub provider_id: String,
    pub unit: String,
}

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Category create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Product provider (supplier)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Provider create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInput {
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

/// User account as managed through the users module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
}

/// User create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountInput {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// One line of a dispensation cart / request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispensationItem {
    pub product_id: String,
    /// Specific batch to draw from, when the dispenser picked one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub quantity: u32,
}

/// Dispensation submitted to the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispensationRequest {
    pub items: Vec<DispensationItem>,
    /// Patient or service the dispensation is destined for
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Dispensation record returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispensation {
    pub id: String,
    pub items: Vec<DispensationItem>,
    pub destination: String,
    pub dispensed_by: String,
    pub created_at: DateTime<Utc>,
}
