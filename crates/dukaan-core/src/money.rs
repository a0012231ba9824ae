//! # Money Module
//!
//! Display-edge helpers for monetary values.
//!
//! ## Why f64, and Why Rounding Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICING ARITHMETIC IS NEVER PRE-ROUNDED                                │
//! │                                                                         │
//! │  The breakdown flows unrounded between steps:                          │
//! │    taxable 24.99 × 8.25% = 2.061675  ──►  stays 2.061675               │
//! │                                                                         │
//! │  Rounding to two decimals happens in EXACTLY one place: when a value   │
//! │  is about to be shown to a human. That place is this module.           │
//! │                                                                         │
//! │  Rounding between steps would silently change final totals and        │
//! │  profit figures - the one bug this core exists to prevent.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::money::{format_amount, round_display};
//!
//! assert_eq!(round_display(2.061675), 2.06);
//! assert_eq!(format_amount(1099.5), "$1099.50");
//! assert_eq!(format_amount(-5.5), "-$5.50");
//! ```

/// Rounds a monetary value to two decimal places for display.
///
/// Half-way cases round away from zero (`f64::round` semantics), matching
/// what the currency formatter in the frontend produces.
///
/// ## Example
/// ```rust
/// use dukaan_core::money::round_display;
///
/// assert_eq!(round_display(27.054), 27.05);
/// assert_eq!(round_display(27.056), 27.06);
/// ```
#[inline]
pub fn round_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats a monetary value as a human-readable string with two decimals.
///
/// ## Note
/// This is for logs and debugging. The frontend formats for actual UI
/// display to handle the locale and currency symbol properly.
pub fn format_amount(amount: f64) -> String {
    let rounded = round_display(amount);
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded.abs())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(10.994), 10.99);
        assert_eq!(round_display(10.996), 11.0);
        assert_eq!(round_display(0.0), 0.0);
        assert_eq!(round_display(-5.506), -5.51);
        assert_eq!(round_display(-5.504), -5.5);
    }

    #[test]
    fn test_round_display_leaves_exact_values_alone() {
        assert_eq!(round_display(27.5), 27.5);
        assert_eq!(round_display(37.5), 37.5);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10.99), "$10.99");
        assert_eq!(format_amount(5.0), "$5.00");
        assert_eq!(format_amount(-5.5), "-$5.50");
        assert_eq!(format_amount(0.0), "$0.00");
    }

    #[test]
    fn test_format_amount_rounds_first() {
        assert_eq!(format_amount(2.061675), "$2.06");
    }
}
