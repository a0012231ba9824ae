//! # Quick Entry
//!
//! Free-text product entry: parse an optional trailing quantity, match the
//! search term against the snapshot, and commit the pick under the STRICT
//! stock policy.
//!
//! ## Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quick-Entry Flow                                     │
//! │                                                                         │
//! │  "blue chair 5"                                                         │
//! │       │                                                                 │
//! │       ▼ parse()                                                         │
//! │  { search_term: "blue chair", quantity: 5 }                             │
//! │       │                                                                 │
//! │       ▼ search()          substring on name / brand / each tag          │
//! │  [Product "Blue Chair", ...]                                            │
//! │       │  user picks a match                                             │
//! │       ▼ commit()                                                        │
//! │  stock 0?        ──► Rejected(OutOfStock), no mutation                  │
//! │  5 > stock?      ──► Rejected(InsufficientStock, 5 vs stock), no        │
//! │                      mutation - REJECTION, not capping                  │
//! │  otherwise       ──► basket::add_product (merge path, silent cap)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Commit Rejects Where the Basket Caps
//! A typed-in quantity is a deliberate request: silently shipping fewer
//! units than the user asked for would falsify the sale they think they
//! recorded. Repeated quick-add CLICKS are incremental, so the merge path
//! caps silently instead. The asymmetry is intentional policy, preserved
//! as two distinct code paths.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::basket::{self, BasketOutcome, RejectReason};
use crate::snapshot::ProductSnapshot;
use crate::types::{Product, SaleDraft};

// =============================================================================
// Parser
// =============================================================================

/// The result of splitting a raw quick-entry input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParsedEntry {
    /// The free-text search term, trimmed.
    pub search_term: String,

    /// The trailing quantity, or `1` when none was given. NOT validated
    /// against stock here - that is always deferred to the moment a match
    /// is committed.
    pub quantity: i64,
}

/// Splits a raw input into a search term and an optional trailing quantity.
///
/// ## Rule
/// If the (trimmed) input ends with whitespace followed by one or more
/// ASCII digits, the digit run is the quantity and is stripped together
/// with the separating whitespace. Otherwise the quantity defaults to `1`
/// and the term is the trimmed input unchanged.
///
/// ## Example
/// ```rust
/// use dukaan_core::quick_entry::parse;
///
/// assert_eq!(parse("blue chair 5").quantity, 5);
/// assert_eq!(parse("blue chair 5").search_term, "blue chair");
/// assert_eq!(parse("blue chair").quantity, 1);
/// ```
pub fn parse(raw: &str) -> ParsedEntry {
    let trimmed = raw.trim();

    let digit_count = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();

    // ASCII digits are single bytes, so this split lands on a boundary.
    if digit_count > 0 && digit_count < trimmed.chars().count() {
        let (head, digits) = trimmed.split_at(trimmed.len() - digit_count);
        if head.ends_with(char::is_whitespace) {
            if let Ok(quantity) = digits.parse::<i64>() {
                return ParsedEntry {
                    search_term: head.trim_end().to_string(),
                    quantity,
                };
            }
        }
    }

    ParsedEntry {
        search_term: trimmed.to_string(),
        quantity: 1,
    }
}

// =============================================================================
// Matching
// =============================================================================

/// Checks whether a product matches a search term.
///
/// Substring containment tested independently against the primary name,
/// the secondary (brand) name, and each tag; a product matches if ANY of
/// these fields contains the term.
///
/// `fold_case` selects case-insensitive matching. The reference behavior
/// (Arabic-oriented data) does no normalization; Latin-script deployments
/// should pass `true`. The policy is an explicit caller decision either
/// way, never silently inherited.
pub fn matches_product(product: &Product, term: &str, fold_case: bool) -> bool {
    let contains = |field: &str| -> bool {
        if fold_case {
            field.to_lowercase().contains(&term.to_lowercase())
        } else {
            field.contains(term)
        }
    };

    contains(&product.name)
        || product.brand.as_deref().map_or(false, contains)
        || product.tags.iter().any(|tag| contains(tag))
}

/// Finds every snapshot product matching the term, in provider order.
pub fn search<'a>(
    snapshot: &'a ProductSnapshot,
    term: &str,
    fold_case: bool,
) -> Vec<&'a Product> {
    snapshot
        .iter()
        .filter(|p| matches_product(p, term, fold_case))
        .collect()
}

// =============================================================================
// Commit
// =============================================================================

/// Commits a picked match with the parsed quantity - the STRICT path.
///
/// ## Behavior
/// - Unknown `product_id` → `NoOp` (the pick list came from the snapshot,
///   so this only happens on a stale click)
/// - `quantity <= 0` → `NoOp`
/// - `available_stock == 0` → `Rejected(OutOfStock)`, no mutation
/// - `quantity > available_stock` → `Rejected(InsufficientStock)` naming
///   both numbers, no mutation. Rejection, NOT silent capping - stricter
///   than [`basket::add_product`], deliberately so.
/// - Otherwise delegates to [`basket::add_product`]. A commit that passes
///   its own check but merges onto an existing line can still push the
///   combined total past stock; that overflow caps under the merge path's
///   own policy.
pub fn commit(
    draft: &mut SaleDraft,
    snapshot: &ProductSnapshot,
    product_id: &str,
    quantity: i64,
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

    if quantity > product.available_stock {
        return BasketOutcome::Rejected {
            reason: RejectReason::InsufficientStock,
            requested: quantity,
            available: product.available_stock,
        };
    }

    basket::add_product(draft, snapshot, product_id, quantity, false)
}

// =============================================================================
// Unit Tests
// =============================================================================
