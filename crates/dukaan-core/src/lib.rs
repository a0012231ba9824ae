//! # dukaan-core: Pure Business Logic for the Dukaan Back-Office
//!
//! This crate is the **heart** of the Dukaan retail back-office. It contains
//! the sale-draft computation and basket rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Dukaan Back-Office Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Frontend (React SPA)                        │   │
//! │  │    Search box ──► Basket table ──► Totals card ──► Submit      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ consumes ts-rs bindings                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │  │  basket  │ │ pricing  │ │validation│ │   quick_entry    │  │   │
//! │  │  │ SaleDraft│ │Breakdown │ │ cap rules│ │ parse/search/    │  │   │
//! │  │  │ LineItem │ │  math    │ │          │ │ commit           │  │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          External collaborators (separate services)             │   │
//! │  │   product snapshot fetch • sale persistence • invoice render    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, SaleDraft)
//! - [`snapshot`] - The read-only product/stock snapshot
//! - [`validation`] - Quantity capping and input validation
//! - [`basket`] - Draft mutations and the tagged [`basket::BasketOutcome`]
//! - [`pricing`] - The breakdown computation (subtotal/tax/profit)
//! - [`quick_entry`] - Free-text entry parsing, matching and strict commit
//! - [`session`] - Owned snapshot+draft pair for embedders, with locking
//! - [`money`] - Display-edge rounding and formatting helpers
//! - [`error`] - Input validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic - same input,
//!    same output. The breakdown is recomputed from scratch on every call;
//!    nothing is cached or incrementally patched.
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here.
//!    The stock snapshot is handed in; the core never refreshes it.
//! 3. **Outcomes, not exceptions**: stock capping, out-of-stock rejection
//!    and silent no-ops are ordinary return values a caller pattern-matches
//!    on. `Result` is reserved for malformed input (negative discount,
//!    tax outside 0-100).
//! 4. **Explicit state**: the draft and the snapshot are passed explicitly.
//!    No module-level mutable caches, no ambient globals.
//!
//! ## Example Usage
//!
//! ```rust
//! use dukaan_core::basket::{self, BasketOutcome};
//! use dukaan_core::pricing;
//! use dukaan_core::snapshot::ProductSnapshot;
//! use dukaan_core::types::{Product, SaleDraft};
//!
//! let snapshot = ProductSnapshot::new(vec![Product {
//!     id: "p-1".into(),
//!     name: "Blue Chair".into(),
//!     brand: None,
//!     tags: vec![],
//!     unit_price: 15.0,
//!     unit_cost: 10.0,
//!     available_stock: 5,
//!     is_low_stock: false,
//! }]);
//!
//! let mut draft = SaleDraft::new();
//! assert_eq!(
//!     basket::add_product(&mut draft, &snapshot, "p-1", 2, false),
//!     BasketOutcome::Applied
//! );
//!
//! let breakdown = pricing::compute(&draft.items, 5.0, 10.0, &snapshot);
//! assert_eq!(breakdown.subtotal, 30.0);
//! assert_eq!(breakdown.final_total, 27.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quick_entry;
pub mod session;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::SaleDraft` instead of
// `use dukaan_core::types::SaleDraft`

pub use basket::{BasketOutcome, RejectReason};
pub use error::{ValidationError, ValidationResult};
pub use pricing::Breakdown;
pub use quick_entry::ParsedEntry;
pub use session::{BasketSession, SessionState};
pub use snapshot::ProductSnapshot;
pub use types::{LineItem, Product, SaleDraft};
pub use validation::CappedQuantity;
