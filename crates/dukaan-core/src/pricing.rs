//! # Pricing Engine
//!
//! The pure function from (line items, discount, tax percentage, product
//! snapshot) to the full money breakdown of a draft sale.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Breakdown Computation                                │
//! │                                                                         │
//! │  1. subtotal    = Σ quantity × line.unit_price   (stored price)        │
//! │  2. total_cost  = Σ quantity × snapshot cost     (LIVE lookup)         │
//! │  3. discount    = discount_amount                (flat, unvalidated)   │
//! │  4. taxable     = subtotal - discount            (may go negative)     │
//! │  5. tax         = taxable × tax_percentage / 100                       │
//! │  6. final_total = subtotal - discount + tax                            │
//! │  7. net_profit  = final_total - total_cost                             │
//! │  8. profit_pct  = total_cost > 0 ? net_profit / total_cost × 100 : 0   │
//! │                                                                         │
//! │  Nothing is rounded between steps. Tax is ALWAYS computed on the       │
//! │  discounted amount, never on the raw subtotal.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Price/Cost Asymmetry
//! The subtotal uses each line's STORED unit price (frozen at add time,
//! possibly user-overridden). Total cost re-reads the CURRENT snapshot cost
//! per product; a product missing from the snapshot contributes zero cost
//! while its line still contributes normally to the subtotal. Profit
//! therefore tracks cost changes made after a line was added.
//!
//! ## Recompute-From-Scratch
//! The engine is called on every change to its inputs and derives the whole
//! breakdown fresh each time. It never patches a previous result - that is
//! what guarantees consistency after any basket edit.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round_display;
use crate::snapshot::ProductSnapshot;
use crate::types::LineItem;

/// The derived money figures of a draft sale.
///
/// Never stored on the draft; always recomputed by [`compute`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Breakdown {
    /// Sum of quantity × stored unit price over all lines.
    pub subtotal: f64,

    /// Sum of quantity × current snapshot cost over all lines.
    pub total_cost: f64,

    /// The flat discount, passed through as-is.
    pub discount_amount: f64,

    /// Tax on the post-discount amount.
    pub tax_amount: f64,

    /// `subtotal - discount + tax`.
    pub final_total: f64,

    /// `final_total - total_cost`.
    pub net_profit: f64,

    /// `net_profit / total_cost × 100`, exactly `0` when there is no cost
    /// basis (never NaN or Infinity).
    pub profit_percentage: f64,
}

impl Breakdown {
    /// A display copy with every field rounded to two decimals.
    ///
    /// For the totals card and the invoice; internal consumers keep the
    /// unrounded figures.
    pub fn rounded(&self) -> Breakdown {
        Breakdown {
            subtotal: round_display(self.subtotal),
            total_cost: round_display(self.total_cost),
            discount_amount: round_display(self.discount_amount),
            tax_amount: round_display(self.tax_amount),
            final_total: round_display(self.final_total),
            net_profit: round_display(self.net_profit),
            profit_percentage: round_display(self.profit_percentage),
        }
    }

    fn zero_with_discount(discount_amount: f64) -> Breakdown {
        Breakdown {
            discount_amount,
            ..Breakdown::default()
        }
    }
}

/// Computes the full breakdown for a set of line items.
///
/// ## Guard Clause
/// If the product snapshot has not loaded yet (empty), the result is
/// all-zero except `discount_amount` (passed through as-is). This prevents
/// a flash of nonsense figures during initial load.
pub fn compute(
    items: &[LineItem],
    discount_amount: f64,
    tax_percentage: f64,
    snapshot: &ProductSnapshot,
) -> Breakdown {
    if snapshot.is_empty() {
        return Breakdown::zero_with_discount(discount_amount);
    }

    let subtotal: f64 = items.iter().map(|item| item.line_total()).sum();
    let total_cost: f64 = items
        .iter()
        .map(|item| item.quantity as f64 * snapshot.unit_cost_of(&item.product_id))
        .sum();

    let taxable_amount = subtotal - discount_amount;
    let tax_amount = taxable_amount * tax_percentage / 100.0;
    let final_total = subtotal - discount_amount + tax_amount;
    let net_profit = final_total - total_cost;
    let profit_percentage = if total_cost > 0.0 {
        net_profit / total_cost * 100.0
    } else {
        0.0
    };

    Breakdown {
        subtotal,
        total_cost,
        discount_amount,
        tax_amount,
        final_total,
        net_profit,
        profit_percentage,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use chrono::Utc;

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

    fn line(product_id: &str, quantity: i64, unit_price: f64, unit_cost: f64) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price,
            unit_cost,
            added_at: Utc::now(),
        }
    }

    /// Scenario B: [{qty 2, price 15, cost 10}], discount 5, tax 10%.
    #[test]
    fn test_full_breakdown() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 15.0, 10.0, 5)]);
        let items = vec![line("1", 2, 15.0, 10.0)];

        let b = compute(&items, 5.0, 10.0, &snapshot);

        assert_eq!(b.subtotal, 30.0);
        assert_eq!(b.total_cost, 20.0);
        assert_eq!(b.discount_amount, 5.0);
        assert_eq!(b.tax_amount, 2.5);
        assert_eq!(b.final_total, 27.5);
        assert_eq!(b.net_profit, 7.5);
        assert_eq!(b.profit_percentage, 37.5);
    }

    /// Scenario C: empty items, no discount, no tax → all zeros.
    #[test]
    fn test_empty_items_all_zero() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 15.0, 10.0, 5)]);
        let b = compute(&[], 0.0, 0.0, &snapshot);
        assert_eq!(b, Breakdown::default());
    }

    #[test]
    fn test_empty_snapshot_guard_passes_discount_through() {
        let items = vec![line("1", 2, 15.0, 10.0)];
        let b = compute(&items, 7.25, 10.0, &ProductSnapshot::empty());

        assert_eq!(b.subtotal, 0.0);
        assert_eq!(b.total_cost, 0.0);
        assert_eq!(b.discount_amount, 7.25);
        assert_eq!(b.tax_amount, 0.0);
        assert_eq!(b.final_total, 0.0);
        assert_eq!(b.net_profit, 0.0);
        assert_eq!(b.profit_percentage, 0.0);
    }

    /// Order-of-operations law: tax is computed on the DISCOUNTED amount,
    /// and a discount larger than the subtotal is allowed.
    #[test]
    fn test_tax_on_discounted_amount_even_when_negative() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 10.0, 4.0, 99)]);
        let items = vec![line("1", 1, 10.0, 4.0)];

        // Discount 25 on subtotal 10 → taxable -15.
        let b = compute(&items, 25.0, 10.0, &snapshot);

        let taxable = 10.0 - 25.0;
        assert_eq!(b.tax_amount, taxable * 10.0 / 100.0);
        assert_eq!(b.final_total, taxable + b.tax_amount);
        assert_eq!(b.final_total, -16.5);
    }

    #[test]
    fn test_order_of_operations_law_over_inputs() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 12.75, 8.0, 99)]);
        let items = vec![line("1", 3, 12.75, 8.0)];

        for discount in [0.0, 5.0, 38.25, 50.0] {
            for tax in [0.0, 8.25, 17.0, 100.0] {
                let b = compute(&items, discount, tax, &snapshot);
                let taxable = b.subtotal - discount;
                assert_eq!(b.final_total, taxable + taxable * tax / 100.0);
            }
        }
    }

    /// Division guard: profit percentage is exactly 0 with no cost basis,
    /// regardless of profit sign.
    #[test]
    fn test_profit_percentage_division_guard() {
        let snapshot = ProductSnapshot::new(vec![test_product("free", 10.0, 0.0, 99)]);
        let items = vec![line("free", 2, 10.0, 0.0)];

        let positive_profit = compute(&items, 0.0, 0.0, &snapshot);
        assert_eq!(positive_profit.total_cost, 0.0);
        assert!(positive_profit.net_profit > 0.0);
        assert_eq!(positive_profit.profit_percentage, 0.0);

        let negative_profit = compute(&items, 50.0, 0.0, &snapshot);
        assert!(negative_profit.net_profit < 0.0);
        assert_eq!(negative_profit.profit_percentage, 0.0);
    }

    /// The asymmetry: subtotal from the line's stored price, cost from the
    /// live snapshot. A product missing from the snapshot contributes zero
    /// cost but full subtotal.
    #[test]
    fn test_missing_product_contributes_price_but_not_cost() {
        let snapshot = ProductSnapshot::new(vec![test_product("still-here", 8.0, 5.0, 9)]);
        let items = vec![line("still-here", 1, 8.0, 5.0), line("vanished", 2, 4.0, 3.0)];

        let b = compute(&items, 0.0, 0.0, &snapshot);

        assert_eq!(b.subtotal, 8.0 + 8.0);
        assert_eq!(b.total_cost, 5.0);
    }

    /// Cost changes after add-time flow into profit; the stored line price
    /// does not move.
    #[test]
    fn test_cost_is_live_price_is_frozen() {
        let items = vec![line("1", 2, 15.0, 10.0)];

        let updated = ProductSnapshot::new(vec![test_product("1", 99.0, 12.0, 5)]);
        let b = compute(&items, 0.0, 0.0, &updated);

        assert_eq!(b.subtotal, 30.0); // stored 15.0, not the new 99.0
        assert_eq!(b.total_cost, 24.0); // live 12.0, not the frozen 10.0
        assert_eq!(b.net_profit, 6.0);
    }

    #[test]
    fn test_intermediates_are_not_pre_rounded() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 24.99, 11.11, 99)]);
        let items = vec![line("1", 1, 24.99, 11.11)];

        let b = compute(&items, 0.0, 8.25, &snapshot);

        // 24.99 × 8.25% carries its full precision into the total...
        assert_eq!(b.tax_amount, 24.99 * 8.25 / 100.0);
        assert_eq!(b.final_total, 24.99 + 24.99 * 8.25 / 100.0);
        // ...and only the display copy rounds.
        assert_eq!(b.rounded().tax_amount, 2.06);
        assert_eq!(b.rounded().final_total, 27.05);
    }

    #[test]
    fn test_breakdown_json_shape() {
        let snapshot = ProductSnapshot::new(vec![test_product("1", 15.0, 10.0, 5)]);
        let items = vec![line("1", 2, 15.0, 10.0)];
        let b = compute(&items, 5.0, 10.0, &snapshot);

        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["subtotal"], 30.0);
        assert_eq!(json["totalCost"], 20.0);
        assert_eq!(json["discountAmount"], 5.0);
        assert_eq!(json["taxAmount"], 2.5);
        assert_eq!(json["finalTotal"], 27.5);
        assert_eq!(json["netProfit"], 7.5);
        assert_eq!(json["profitPercentage"], 37.5);
    }
}
