//! # Product Snapshot
//!
//! The read-only, point-in-time copy of product stock/pricing data that all
//! validation and pricing runs against.
//!
//! ## Freshness Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Freshness                                  │
//! │                                                                         │
//! │  Session start ──► external fetch ──► ProductSnapshot (THIS TYPE)      │
//! │                                              │                          │
//! │        every keystroke / click ──────────────┤ read-only lookups        │
//! │                                              │                          │
//! │  Submit ──► persistence collaborator re-validates against the SERVER   │
//! │                                                                         │
//! │  The cap is only as fresh as the last fetch. Two users depleting the   │
//! │  same stock concurrently is re-checked at submission time, not here.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An EMPTY snapshot means "not loaded yet" - the pricing engine guards on
//! it and returns an all-zero breakdown instead of computing over nothing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

/// The product snapshot handed in by the external data-fetching
/// collaborator at the start of a basket-editing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    products: Vec<Product>,
}

impl ProductSnapshot {
    /// Wraps the fetched product list.
    pub fn new(products: Vec<Product>) -> Self {
        ProductSnapshot { products }
    }

    /// An unloaded snapshot. Pricing over it yields the all-zero breakdown.
    pub fn empty() -> Self {
        ProductSnapshot {
            products: Vec::new(),
        }
    }

    /// True when the snapshot has not loaded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products in the snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Live cost lookup for the pricing engine.
    ///
    /// A product missing from the snapshot contributes `0.0` - the line
    /// still contributes normally to the subtotal via its stored price.
    pub fn unit_cost_of(&self, product_id: &str) -> f64 {
        self.get(product_id).map_or(0.0, |p| p.unit_cost)
    }

    /// Live stock lookup for the quantity validator.
    pub fn available_stock_of(&self, product_id: &str) -> Option<i64> {
        self.get(product_id).map(|p| p.available_stock)
    }

    /// Iterates over the products, in provider order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, cost: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: None,
            tags: vec![],
            unit_price: 10.0,
            unit_cost: cost,
            available_stock: stock,
            is_low_stock: false,
        }
    }

    #[test]
    fn test_lookup() {
        let snapshot = ProductSnapshot::new(vec![
            test_product("a", 4.0, 3),
            test_product("b", 6.0, 0),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get("a").is_some());
        assert!(snapshot.get("missing").is_none());
        assert_eq!(snapshot.available_stock_of("b"), Some(0));
        assert_eq!(snapshot.available_stock_of("missing"), None);
    }

    #[test]
    fn test_missing_product_costs_zero() {
        let snapshot = ProductSnapshot::new(vec![test_product("a", 4.0, 3)]);
        assert_eq!(snapshot.unit_cost_of("a"), 4.0);
        assert_eq!(snapshot.unit_cost_of("missing"), 0.0);
    }

    #[test]
    fn test_empty_means_not_loaded() {
        assert!(ProductSnapshot::empty().is_empty());
        assert!(ProductSnapshot::default().is_empty());
        assert!(!ProductSnapshot::new(vec![test_product("a", 1.0, 1)]).is_empty());
    }
}
