//! # Basket Manager
//!
//! Owns the mutation rules for a [`SaleDraft`]'s ordered line items: add
//! with merge, index-based quantity update, removal, and the two distinct
//! clear flavors.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                                    │
//! │                                                                         │
//! │  User action               Operation                Outcome             │
//! │  ───────────               ─────────                ───────             │
//! │                                                                         │
//! │  Click product ──────────► add_product() ─────────► Applied / Capped   │
//! │                              │ merges into an        Rejected (stock 0) │
//! │                              │ existing line         NoOp (unknown id)  │
//! │                                                                         │
//! │  Type quantity ──────────► update_quantity() ─────► Applied / Capped   │
//! │                              │ ≤ 0 removes           Removed / NoOp     │
//! │                                                                         │
//! │  Click minus to zero ────► update_quantity(_, 0) ─► Removed            │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ─────────► Removed / NoOp     │
//! │                                                                         │
//! │  Cancel sale ────────────► clear_items()            items only         │
//! │  Quick-sale done ────────► reset()                  items + discount   │
//! │                                                     + customer fields  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation funnels its quantity through
//! [`validation::validate_and_cap`] and reports what actually happened as a
//! [`BasketOutcome`] - never an exception. Presentation pattern-matches on
//! the outcome instead of re-deriving intent from a boolean plus a
//! side-channel message string.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::snapshot::ProductSnapshot;
use crate::types::{LineItem, SaleDraft};
use crate::validation;

// =============================================================================
// Outcomes
// =============================================================================

/// Why a basket mutation was refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RejectReason {
    /// The product has zero available stock.
    OutOfStock,
    /// The requested quantity exceeds available stock (strict commit path;
    /// the merge path caps instead).
    InsufficientStock,
}

/// What a basket mutation actually did.
///
/// ## Taxonomy (mirrors the error-handling policy)
/// - `Applied` - mutation proceeded at the requested quantity
/// - `Capped` - mutation proceeded at a reduced quantity; the numbers are
///   part of the contract so presentation can warn with exact values
/// - `Rejected` - no mutation at all; requires a user-visible message
///   naming the requested/available numbers
/// - `Removed` - the line was deleted (explicit remove, or a quantity
///   driven to zero). Not an error.
/// - `NoOp` - silent nothing-happened: unknown product id, non-positive
///   add quantity, out-of-range line index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum BasketOutcome {
    Applied,
    Capped { requested: i64, applied: i64 },
    Rejected {
        reason: RejectReason,
        requested: i64,
        available: i64,
    },
    Removed,
    NoOp,
}

impl BasketOutcome {
    /// True when the draft was mutated in any way.
    pub fn mutated(&self) -> bool {
        !matches!(self, BasketOutcome::Rejected { .. } | BasketOutcome::NoOp)
    }

    /// A default user-facing message for the cases that warrant one.
    ///
    /// The exact wording is presentation's to restyle; the requested and
    /// available numbers it carries are part of this core's contract.
    pub fn user_message(&self) -> Option<String> {
        match self {
            BasketOutcome::Capped { requested, applied } => Some(format!(
                "Requested {} but only {} in stock - quantity was reduced to {}",
                requested, applied, applied
            )),
            BasketOutcome::Rejected {
                reason: RejectReason::OutOfStock,
                ..
            } => Some("Product is out of stock".to_string()),
            BasketOutcome::Rejected {
                reason: RejectReason::InsufficientStock,
                requested,
                available,
            } => Some(format!(
                "Requested {} but only {} available",
                requested, available
            )),
            BasketOutcome::Applied | BasketOutcome::Removed | BasketOutcome::NoOp => None,
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

/// Adds a product to the draft, merging into an existing line.
///
/// ## Behavior
/// - Unknown `product_id` → `NoOp` (silent; callers must not expect an
///   exception)
/// - `quantity <= 0` → `NoOp` (never merges, never creates a line)
/// - `available_stock == 0` → `Rejected(OutOfStock)` before the validator
///   ever runs
/// - Line already present → the REQUESTED TOTAL is `existing + quantity`;
///   the validator caps that total and the existing line's quantity is
///   replaced with the capped result (not incremented blindly)
/// - No line yet → the validator caps `quantity` alone and a new line is
///   appended at the end iff the capped quantity is ≥ 1, with
///   `unit_price`/`unit_cost` frozen from the snapshot at this instant
///
/// `notify` opts in to the validator's structured warning when a cap
/// fires - used by deliberate single adds, skipped by rapid quick-add
/// clicks where interrupting every click would be disruptive.
pub fn add_product(
    draft: &mut SaleDraft,
    snapshot: &ProductSnapshot,
    product_id: &str,
    quantity: i64,
    notify: bool,
) -> BasketOutcome {
    let Some(product) = snapshot.get(product_id) else {
        return BasketOutcome::NoOp;
    };

    if quantity <= 0 {
        return BasketOutcome::NoOp;
    }

    if product.is_out_of_stock() {
        return BasketOutcome::Rejected {
            reason: RejectReason::OutOfStock,
            requested: quantity,
            available: product.available_stock,
        };
    }

    if let Some(index) = draft.line_index_of(product_id) {
        let requested_total = draft.items[index].quantity + quantity;
        let capped = validation::validate_and_cap(snapshot, product_id, requested_total, notify);
        draft.items[index].quantity = capped.quantity;
        if capped.was_reduced {
            return BasketOutcome::Capped {
                requested: requested_total,
                applied: capped.quantity,
            };
        }
        return BasketOutcome::Applied;
    }

    let capped = validation::validate_and_cap(snapshot, product_id, quantity, notify);
    if capped.quantity < 1 {
        return BasketOutcome::NoOp;
    }

    draft.items.push(LineItem::from_product(product, capped.quantity));
    if capped.was_reduced {
        BasketOutcome::Capped {
            requested: quantity,
            applied: capped.quantity,
        }
    } else {
        BasketOutcome::Applied
    }
}

/// Replaces the quantity of the line at `line_index`.
///
/// ## Behavior
/// - Index out of bounds → `NoOp`
/// - `new_quantity <= 0` → the line is removed (`Removed`). This is the
///   "minus" control reaching zero - a normal flow, not an invalid input.
/// - Otherwise the validator caps against the line's product and the
///   quantity is replaced with the capped value. If the product has since
///   vanished from the snapshot the line is left untouched (`NoOp`); if
///   its stock has since dropped to zero the line cannot keep a positive
///   quantity and is removed.
pub fn update_quantity(
    draft: &mut SaleDraft,
    snapshot: &ProductSnapshot,
    line_index: usize,
    new_quantity: i64,
    notify: bool,
) -> BasketOutcome {
    if line_index >= draft.items.len() {
        return BasketOutcome::NoOp;
    }

    if new_quantity <= 0 {
        draft.items.remove(line_index);
        return BasketOutcome::Removed;
    }

    let product_id = draft.items[line_index].product_id.clone();
    let capped = validation::validate_and_cap(snapshot, &product_id, new_quantity, notify);

    if capped.quantity == 0 {
        if capped.was_reduced {
            // Stock dropped to zero since the line was added.
            draft.items.remove(line_index);
            return BasketOutcome::Removed;
        }
        return BasketOutcome::NoOp;
    }

    draft.items[line_index].quantity = capped.quantity;
    if capped.was_reduced {
        BasketOutcome::Capped {
            requested: new_quantity,
            applied: capped.quantity,
        }
    } else {
        BasketOutcome::Applied
    }
}

/// Deletes the line at `line_index`.
///
/// Remaining lines shift down by one; nothing is renumbered or merged
/// beyond that implicit shift.
pub fn remove_item(draft: &mut SaleDraft, line_index: usize) -> BasketOutcome {
    if line_index >= draft.items.len() {
        return BasketOutcome::NoOp;
    }
    draft.items.remove(line_index);
    BasketOutcome::Removed
}

/// Clears the item list only (full-sale flow).
///
/// Discount, tax and customer fields are untouched.
pub fn clear_items(draft: &mut SaleDraft) {
    draft.items.clear();
}

/// Resets the draft for the next quick sale.
///
/// Clears items, the discount and the customer fields together, and
/// restamps `created_at`. Tax percentage survives: it is a store-level
/// setting, not a per-basket one. Kept distinct from [`clear_items`] -
/// the two flows must not be unified.
pub fn reset(draft: &mut SaleDraft) {
    draft.items.clear();
    draft.discount_amount = 0.0;
    draft.customer_name = None;
    draft.customer_phone = None;
    draft.created_at = chrono::Utc::now();
}

/// Sets the draft-wide flat discount.
pub fn set_discount(draft: &mut SaleDraft, amount: f64) -> ValidationResult<()> {
    validation::validate_discount_amount(amount)?;
    draft.discount_amount = amount;
    Ok(())
}

/// Sets the tax percentage applied to the post-discount amount.
pub fn set_tax_percentage(draft: &mut SaleDraft, pct: f64) -> ValidationResult<()> {
    validation::validate_tax_percentage(pct)?;
    draft.tax_percentage = pct;
    Ok(())
}

/// Overrides the stored unit price of the line at `line_index` (manual
/// per-line discount).
///
/// The draft never re-derives an overridden price; the pricing engine uses
/// it as-is for the subtotal.
pub fn override_unit_price(
    draft: &mut SaleDraft,
    line_index: usize,
    price: f64,
) -> ValidationResult<BasketOutcome> {
    validation::validate_unit_price(price)?;

    if line_index >= draft.items.len() {
        return Ok(BasketOutcome::NoOp);
    }
    draft.items[line_index].unit_price = price;
    Ok(BasketOutcome::Applied)
}

// =============================================================================
// Unit Tests
// =============================================================================
