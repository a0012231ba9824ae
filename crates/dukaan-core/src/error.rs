//! # Error Types
//!
//! Input validation errors for dukaan-core.
//!
//! ## Where Errors Do (and Do Not) Appear
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Outcome vs Error                                 │
//! │                                                                         │
//! │  Basket mutations (add / update / remove / commit)                     │
//! │  └── NEVER error. They return a tagged BasketOutcome the caller        │
//! │      pattern-matches on: Applied, Capped, Rejected, Removed, NoOp.     │
//! │                                                                         │
//! │  Draft settings (set_discount, set_tax_percentage, price override)     │
//! │  └── ValidationError (this file) when the input itself is malformed:   │
//! │      a negative discount, a tax percentage outside 0-100, NaN.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bounds)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs. Stock capping is NOT a validation error - see
/// [`crate::basket::BasketOutcome`].
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Value is NaN or infinite and cannot enter monetary arithmetic.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
