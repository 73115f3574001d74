//! Dispensation cart store
//!
//! Ephemeral per-user carts kept in memory while a dispensation is being
//! assembled. Keyed by user id; a user has at most one open cart. Carts are
//! deliberately not persisted: losing one on restart costs a few clicks,
//! never stock.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use shared::models::DispensationItem;

/// One user's open cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<DispensationItem>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Concurrent cart store, one entry per user id
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Current cart for a user; empty when none exists
    pub fn get(&self, user_id: &str) -> Cart {
        self.carts
            .get(user_id)
            .map(|c| c.clone())
            .unwrap_or_else(Cart::empty)
    }

    /// Add an item, merging quantities for the same product/batch line
    pub fn add_item(&self, user_id: &str, item: DispensationItem) -> Cart {
        let mut entry = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(Cart::empty);

        match entry
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id && i.batch_id == item.batch_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => entry.items.push(item),
        }
        entry.updated_at = Utc::now();
        entry.clone()
    }

    /// Remove every line for a product; returns the updated cart
    pub fn remove_product(&self, user_id: &str, product_id: &str) -> Cart {
        match self.carts.get_mut(user_id) {
            Some(mut entry) => {
                entry.items.retain(|i| i.product_id != product_id);
                entry.updated_at = Utc::now();
                entry.clone()
            }
            None => Cart::empty(),
        }
    }

    /// Drop a user's cart entirely
    pub fn clear(&self, user_id: &str) {
        self.carts.remove(user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: &str, qty: u32) -> DispensationItem {
        DispensationItem {
            product_id: product.to_string(),
            batch_id: None,
            quantity: qty,
        }
    }

    #[test]
    fn test_missing_cart_reads_as_empty() {
        let store = CartStore::new();
        assert!(store.get("u-1").is_empty());
    }

    #[test]
    fn test_add_merges_same_product_lines() {
        let store = CartStore::new();
        store.add_item("u-1", item("p-1", 2));
        let cart = store.add_item("u-1", item("p-1", 3));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_distinct_batches_stay_separate() {
        let store = CartStore::new();
        store.add_item(
            "u-1",
            DispensationItem {
                product_id: "p-1".to_string(),
                batch_id: Some("b-1".to_string()),
                quantity: 1,
            },
        );
        let cart = store.add_item(
            "u-1",
            DispensationItem {
                product_id: "p-1".to_string(),
                batch_id: Some("b-2".to_string()),
                quantity: 1,
            },
        );
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_carts_are_isolated_per_user() {
        let store = CartStore::new();
        store.add_item("u-1", item("p-1", 1));
        assert!(store.get("u-2").is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let store = CartStore::new();
        store.add_item("u-1", item("p-1", 1));
        store.add_item("u-1", item("p-2", 1));

        let cart = store.remove_product("u-1", "p-1");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, "p-2");

        store.clear("u-1");
        assert!(store.get("u-1").is_empty());
    }
}
