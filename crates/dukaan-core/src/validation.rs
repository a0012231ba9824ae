//! # Validation Module
//!
//! Quantity capping against the stock snapshot, plus input validation for
//! draft settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, non-numeric)                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_and_cap: quantity vs live snapshot stock                 │
//! │  └── setting validators: discount ≥ 0, tax in 0-100                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence collaborator (out of scope)                      │
//! │  └── Re-validates stock against the SERVER at submission time          │
//! │                                                                         │
//! │  Defense in depth: the cap here is only as fresh as the snapshot.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

use crate::error::{ValidationError, ValidationResult};
use crate::snapshot::ProductSnapshot;

// =============================================================================
// Quantity Validator / Capper
// =============================================================================

/// The result of capping a requested quantity against available stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CappedQuantity {
    /// The admissible quantity. `0` means "do nothing further" (unknown
    /// product), never "create a zero-quantity line".
    pub quantity: i64,

    /// Whether the request was reduced to fit the available stock.
    pub was_reduced: bool,
}

/// Caps a requested quantity to the product's available stock.
///
/// Pure lookup-and-clamp; no side effects beyond an optional structured
/// warning.
///
/// ## Behavior
/// - Product not in the snapshot → `{ quantity: 0, was_reduced: false }`.
///   The caller must treat `0` as a silent no-op, not as a valid
///   zero-quantity line.
/// - `requested > available_stock` → capped to `available_stock`,
///   `was_reduced = true`. When `notify` is set, a warning naming BOTH the
///   requested and the capped quantity is emitted for the user-facing log.
/// - Otherwise the quantity passes through unchanged.
///
/// Callers are expected to have already rejected `requested <= 0` upstream;
/// a non-positive request simply passes through uncapped (stock can only
/// reduce it, and [`crate::basket`] never lets it reach a line).
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Basket: merge-add 4 more of a product already at quantity 3           │
/// │                                                                         │
/// │  validate_and_cap(snapshot, "p-1", 3 + 4, notify)                      │
/// │       │                                                                 │
/// │       ├── available_stock = 5  →  { quantity: 5, was_reduced: true }   │
/// │       │                           notify? warn!(requested=7, capped=5) │
/// │       │                                                                 │
/// │       └── available_stock = 9  →  { quantity: 7, was_reduced: false }  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_and_cap(
    snapshot: &ProductSnapshot,
    product_id: &str,
    requested: i64,
    notify: bool,
) -> CappedQuantity {
    let Some(available) = snapshot.available_stock_of(product_id) else {
        return CappedQuantity {
            quantity: 0,
            was_reduced: false,
        };
    };

    if requested > available {
        if notify {
            warn!(
                product_id = %product_id,
                requested = %requested,
                capped = %available,
                "requested quantity exceeds available stock, capped"
            );
        }
        return CappedQuantity {
            quantity: available,
            was_reduced: true,
        };
    }

    CappedQuantity {
        quantity: requested,
        was_reduced: false,
    }
}

// =============================================================================
// Setting Validators
// =============================================================================

/// Validates a flat discount amount.
///
/// ## Rules
/// - Must be finite (no NaN/Infinity entering monetary arithmetic)
/// - Must be non-negative
/// - Deliberately NOT bounded by the subtotal: a discount larger than the
///   subtotal is allowed and produces a negative taxable amount
pub fn validate_discount_amount(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "discount_amount",
        });
    }
    if amount < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount_amount",
        });
    }
    Ok(())
}

/// Validates a tax percentage.
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 100 inclusive
pub fn validate_tax_percentage(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "tax_percentage",
        });
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "tax_percentage",
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(())
}

/// Validates a manually overridden per-line unit price.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero allowed: free items)
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite { field: "unit_price" });
    }
    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative { field: "unit_price" });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn snapshot_with(id: &str, stock: i64) -> ProductSnapshot {
        ProductSnapshot::new(vec![Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: None,
            tags: vec![],
            unit_price: 10.0,
            unit_cost: 6.0,
            available_stock: stock,
            is_low_stock: false,
        }])
    }

    #[test]
    fn test_within_stock_passes_through_unchanged() {
        let snapshot = snapshot_with("p", 5);
        for qty in [1, 3, 5] {
            let capped = validate_and_cap(&snapshot, "p", qty, false);
            assert_eq!(capped.quantity, qty);
            assert!(!capped.was_reduced);
        }
    }

    #[test]
    fn test_over_stock_caps_to_available() {
        let snapshot = snapshot_with("p", 5);
        let capped = validate_and_cap(&snapshot, "p", 6, false);
        assert_eq!(capped.quantity, 5);
        assert!(capped.was_reduced);

        let capped = validate_and_cap(&snapshot, "p", 1000, true);
        assert_eq!(capped.quantity, 5);
        assert!(capped.was_reduced);
    }

    #[test]
    fn test_over_zero_stock_caps_to_zero() {
        let snapshot = snapshot_with("p", 0);
        let capped = validate_and_cap(&snapshot, "p", 1, false);
        assert_eq!(capped.quantity, 0);
        assert!(capped.was_reduced);
    }

    #[test]
    fn test_unknown_product_is_silent_zero() {
        let snapshot = snapshot_with("p", 5);
        let capped = validate_and_cap(&snapshot, "ghost", 3, true);
        assert_eq!(capped.quantity, 0);
        assert!(!capped.was_reduced);
    }

    #[test]
    fn test_validate_discount_amount() {
        assert!(validate_discount_amount(0.0).is_ok());
        assert!(validate_discount_amount(99.99).is_ok());
        // Larger than any plausible subtotal is still fine by design.
        assert!(validate_discount_amount(1_000_000.0).is_ok());

        assert!(validate_discount_amount(-0.01).is_err());
        assert!(validate_discount_amount(f64::NAN).is_err());
        assert!(validate_discount_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_tax_percentage() {
        assert!(validate_tax_percentage(0.0).is_ok());
        assert!(validate_tax_percentage(8.25).is_ok());
        assert!(validate_tax_percentage(100.0).is_ok());

        assert!(validate_tax_percentage(-1.0).is_err());
        assert!(validate_tax_percentage(100.01).is_err());
        assert!(validate_tax_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(10.99).is_ok());
        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
    }
}
