//! # Domain Types
//!
//! Core domain types for the sale-draft basket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │    SaleDraft    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  items          │       │
//! │  │  name / brand   │   │  quantity       │   │  discount_amount│       │
//! │  │  unit_price     │──►│  unit_price (❄) │──►│  tax_percentage │       │
//! │  │  unit_cost      │   │  unit_cost  (❄) │   │  customer_*     │       │
//! │  │  available_stock│   │  added_at       │   │  created_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  (❄) = frozen from the snapshot at the moment the line was added        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`LineItem`] freezes `unit_price` and `unit_cost` when it is created.
//! If the product's price later changes in the snapshot, the line keeps the
//! price the user saw. Cost is the deliberate exception: the pricing engine
//! re-reads the CURRENT snapshot cost per line, so profit figures track cost
//! changes made after the line was added (see [`crate::pricing`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A sellable product as supplied by the stock snapshot provider.
///
/// Read-only from this core's perspective: the snapshot is fetched once per
/// editing session by an external collaborator and never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, opaque to this core.
    pub id: String,

    /// Primary display name, searched by quick entry.
    pub name: String,

    /// Secondary (brand) name, searched by quick entry.
    pub brand: Option<String>,

    /// Free-form tags, each searched by quick entry.
    pub tags: Vec<String>,

    /// Selling price per unit. Non-negative.
    pub unit_price: f64,

    /// Cost per unit, used only for profit computation.
    /// Not shown to non-privileged views.
    pub unit_cost: f64,

    /// Units physically available. Non-negative. The authoritative ceiling
    /// for the quantity on any single line referencing this product.
    pub available_stock: i64,

    /// Derived elsewhere (low-stock alert threshold); informational only.
    pub is_low_stock: bool,
}

impl Product {
    /// Checks whether the product has any stock at all.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.available_stock <= 0
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product-quantity-price entry within a draft sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Reference into the product snapshot.
    pub product_id: String,

    /// Positive integer; capped against `available_stock` at the time of
    /// last validation. Concurrent stock drops are not re-checked here -
    /// submission-time re-validation is the persistence layer's job.
    pub quantity: i64,

    /// Price per unit, frozen from the snapshot when the line was added or
    /// updated via a product pick. May be overridden by the user afterwards
    /// (manual per-line discount); never re-derived.
    pub unit_price: f64,

    /// Cost per unit, frozen at add time. Profit computation only.
    pub unit_cost: f64,

    /// When this line was added to the draft.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a new line item from a product, freezing price and cost.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            quantity,
            unit_price: product.unit_price,
            unit_cost: product.unit_cost,
            added_at: Utc::now(),
        }
    }

    /// Line total from the stored (frozen or overridden) unit price.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The in-memory, not-yet-submitted sale: line items plus discount/tax
/// settings and the customer the sale is being written up for.
///
/// ## Invariants
/// - Items are unique by `product_id`; adding the same product merges into
///   the existing line rather than appending a duplicate
/// - Every quantity is positive; driving one to zero removes the line
/// - Derived figures (subtotal, totals, profit) are never stored on the
///   draft - [`crate::pricing::compute`] recomputes them on demand
///
/// ## Lifecycle
/// Created empty when the "new sale" flow starts, or populated from a
/// previously persisted sale when editing. Mutated in memory only through
/// [`crate::basket`] operations until handed to the persistence
/// collaborator; on submit it is discarded (new sale) or replaced by the
/// server's canonical record (edit).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleDraft {
    /// Ordered line items. Insertion order is preserved.
    pub items: Vec<LineItem>,

    /// Flat discount applied to the whole draft. Non-negative; deliberately
    /// NOT validated against the subtotal (see [`crate::pricing`]).
    pub discount_amount: f64,

    /// Tax percentage (0-100), applied to the post-discount amount.
    pub tax_percentage: f64,

    /// Customer name for the invoice header, if captured.
    pub customer_name: Option<String>,

    /// Customer phone for the invoice header, if captured.
    pub customer_phone: Option<String>,

    /// When the draft was started or last fully reset.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleDraft {
    /// Creates a new empty draft (the "new sale" flow).
    pub fn new() -> Self {
        SaleDraft {
            items: Vec::new(),
            discount_amount: 0.0,
            tax_percentage: 0.0,
            customer_name: None,
            customer_phone: None,
            created_at: Utc::now(),
        }
    }

    /// Checks if the draft has no line items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines (unique products) in the draft.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Finds the index of the line referencing `product_id`, if any.
    pub fn line_index_of(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }
}

impl Default for SaleDraft {
    fn default() -> Self {
        SaleDraft::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: f64, cost: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: None,
            tags: vec![],
            unit_price: price,
            unit_cost: cost,
            available_stock: stock,
            is_low_stock: false,
        }
    }

    #[test]
    fn test_line_item_freezes_price_and_cost() {
        let mut product = test_product("1", 15.0, 10.0, 5);
        let line = LineItem::from_product(&product, 2);

        product.unit_price = 99.0;
        product.unit_cost = 50.0;

        assert_eq!(line.unit_price, 15.0);
        assert_eq!(line.unit_cost, 10.0);
        assert_eq!(line.line_total(), 30.0);
    }

    #[test]
    fn test_draft_starts_empty() {
        let draft = SaleDraft::new();
        assert!(draft.is_empty());
        assert_eq!(draft.item_count(), 0);
        assert_eq!(draft.total_quantity(), 0);
        assert_eq!(draft.discount_amount, 0.0);
        assert_eq!(draft.tax_percentage, 0.0);
    }

    #[test]
    fn test_line_index_of() {
        let mut draft = SaleDraft::new();
        draft
            .items
            .push(LineItem::from_product(&test_product("a", 1.0, 0.5, 9), 1));
        draft
            .items
            .push(LineItem::from_product(&test_product("b", 2.0, 1.0, 9), 1));

        assert_eq!(draft.line_index_of("a"), Some(0));
        assert_eq!(draft.line_index_of("b"), Some(1));
        assert_eq!(draft.line_index_of("c"), None);
    }

    #[test]
    fn test_out_of_stock_check() {
        assert!(test_product("1", 1.0, 0.5, 0).is_out_of_stock());
        assert!(!test_product("1", 1.0, 0.5, 1).is_out_of_stock());
    }
}
