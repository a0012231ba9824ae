//! # Basket Session
//!
//! The owned (snapshot, draft) pair an embedding application drives, plus a
//! lock wrapper for hosts whose commands run concurrently.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Session Lifecycle                             │
//! │                                                                         │
//! │  "New sale" ──► fetch snapshot ──► BasketSession::new(snapshot)        │
//! │  "Edit sale" ─► fetch snapshot + persisted draft ──► ::resume(...)     │
//! │                           │                                             │
//! │       user intents ───────┤ add / lookup / commit / update / remove    │
//! │                           │ clear / reset / discount / tax / override  │
//! │                           │                                             │
//! │       every render ───────┤ breakdown()  (recomputed from scratch)     │
//! │                           │                                             │
//! │  Submit ──► draft serialized by the persistence collaborator;          │
//! │             the session is dropped (new) or replaced (edit)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All computation here is synchronous and single-threaded from the
//! perspective of one basket session. The snapshot is fetched ONCE per
//! editing session and never re-validated against the server on a
//! keystroke; submission-time re-validation belongs to the persistence
//! collaborator.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::basket::{self, BasketOutcome};
use crate::error::ValidationResult;
use crate::pricing::{self, Breakdown};
use crate::quick_entry::{self, ParsedEntry};
use crate::snapshot::ProductSnapshot;
use crate::types::{Product, SaleDraft};

/// One basket-editing session: the point-in-time product snapshot plus the
/// draft being built against it.
#[derive(Debug, Clone)]
pub struct BasketSession {
    snapshot: ProductSnapshot,
    draft: SaleDraft,
}

impl BasketSession {
    /// Starts a fresh session with an empty draft (the "new sale" flow).
    pub fn new(snapshot: ProductSnapshot) -> Self {
        BasketSession {
            snapshot,
            draft: SaleDraft::new(),
        }
    }

    /// Resumes editing a previously persisted sale: the external
    /// collaborator rehydrates the draft, this core takes over mutation.
    pub fn resume(snapshot: ProductSnapshot, draft: SaleDraft) -> Self {
        BasketSession { snapshot, draft }
    }

    /// The session's read-only product snapshot.
    pub fn snapshot(&self) -> &ProductSnapshot {
        &self.snapshot
    }

    /// The draft in its current state.
    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    /// Adds a product by id (deliberate pick - cap warnings opt in).
    pub fn add_product(&mut self, product_id: &str, quantity: i64, notify: bool) -> BasketOutcome {
        debug!(product_id = %product_id, quantity = %quantity, "add_product");
        basket::add_product(&mut self.draft, &self.snapshot, product_id, quantity, notify)
    }

    /// Parses a raw quick-entry input and returns the matches alongside it.
    ///
    /// The caller shows the matches, the user picks one, and the pick goes
    /// through [`commit_entry`](Self::commit_entry).
    pub fn lookup(&self, raw_input: &str, fold_case: bool) -> (ParsedEntry, Vec<&Product>) {
        let entry = quick_entry::parse(raw_input);
        let matches = quick_entry::search(&self.snapshot, &entry.search_term, fold_case);
        debug!(
            search_term = %entry.search_term,
            quantity = %entry.quantity,
            matches = matches.len(),
            "lookup"
        );
        (entry, matches)
    }

    /// Commits a quick-entry pick under the strict stock policy.
    pub fn commit_entry(&mut self, product_id: &str, quantity: i64) -> BasketOutcome {
        debug!(product_id = %product_id, quantity = %quantity, "commit_entry");
        quick_entry::commit(&mut self.draft, &self.snapshot, product_id, quantity)
    }

    /// Replaces the quantity of the line at `line_index` (zero removes).
    pub fn update_quantity(
        &mut self,
        line_index: usize,
        new_quantity: i64,
        notify: bool,
    ) -> BasketOutcome {
        debug!(line_index = %line_index, new_quantity = %new_quantity, "update_quantity");
        basket::update_quantity(
            &mut self.draft,
            &self.snapshot,
            line_index,
            new_quantity,
            notify,
        )
    }

    /// Deletes the line at `line_index`.
    pub fn remove_item(&mut self, line_index: usize) -> BasketOutcome {
        debug!(line_index = %line_index, "remove_item");
        basket::remove_item(&mut self.draft, line_index)
    }

    /// Clears the item list only (full-sale flow).
    pub fn clear_items(&mut self) {
        info!(items = self.draft.item_count(), "clear_items");
        basket::clear_items(&mut self.draft);
    }

    /// Resets items, discount and customer fields (quick-sale flow).
    pub fn reset(&mut self) {
        info!(items = self.draft.item_count(), "reset");
        basket::reset(&mut self.draft);
    }

    /// Sets the draft-wide flat discount.
    pub fn set_discount(&mut self, amount: f64) -> ValidationResult<()> {
        debug!(amount = %amount, "set_discount");
        basket::set_discount(&mut self.draft, amount)
    }

    /// Sets the tax percentage.
    pub fn set_tax_percentage(&mut self, pct: f64) -> ValidationResult<()> {
        debug!(pct = %pct, "set_tax_percentage");
        basket::set_tax_percentage(&mut self.draft, pct)
    }

    /// Overrides a line's stored unit price (manual per-line discount).
    pub fn override_unit_price(
        &mut self,
        line_index: usize,
        price: f64,
    ) -> ValidationResult<BasketOutcome> {
        debug!(line_index = %line_index, price = %price, "override_unit_price");
        basket::override_unit_price(&mut self.draft, line_index, price)
    }

    /// Sets the customer the sale is being written up for.
    pub fn set_customer(&mut self, name: Option<String>, phone: Option<String>) {
        self.draft.customer_name = name;
        self.draft.customer_phone = phone;
    }

    /// The current breakdown, recomputed from scratch.
    pub fn breakdown(&self) -> Breakdown {
        pricing::compute(
            &self.draft.items,
            self.draft.discount_amount,
            self.draft.tax_percentage,
            &self.snapshot,
        )
    }
}

// =============================================================================
// Shared Session State
// =============================================================================

/// A [`BasketSession`] behind `Arc<Mutex<_>>` for hosts whose commands can
/// run concurrently (one writer at a time, reads are quick).
///
/// ## Why Not RwLock?
/// Session operations are typically quick, and most operations modify
/// state. A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<BasketSession>>,
}

impl SessionState {
    /// Wraps a session for shared access.
    pub fn new(session: BasketSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let breakdown = state.with_session(|s| s.breakdown());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BasketSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let outcome = state.with_session_mut(|s| s.add_product("p-1", 1, true));
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BasketSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::RejectReason;

    fn test_product(id: &str, name: &str, price: f64, cost: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            brand: None,
            tags: vec![],
            unit_price: price,
            unit_cost: cost,
            available_stock: stock,
            is_low_stock: false,
        }
    }

    fn session() -> BasketSession {
        BasketSession::new(ProductSnapshot::new(vec![
            test_product("1", "Blue Chair", 15.0, 10.0, 5),
            test_product("2", "Desk Lamp", 8.0, 5.0, 10),
        ]))
    }

    #[test]
    fn test_end_to_end_quick_sale() {
        let mut s = session();

        let (entry, matches) = s.lookup("Blue Chair 2", false);
        assert_eq!(entry.quantity, 2);
        assert_eq!(matches.len(), 1);
        let picked = matches[0].id.clone();

        assert_eq!(s.commit_entry(&picked, entry.quantity), BasketOutcome::Applied);
        s.set_discount(5.0).unwrap();
        s.set_tax_percentage(10.0).unwrap();

        let b = s.breakdown();
        assert_eq!(b.subtotal, 30.0);
        assert_eq!(b.final_total, 27.5);
        assert_eq!(b.net_profit, 7.5);

        s.reset();
        assert!(s.draft().is_empty());
        assert_eq!(s.draft().discount_amount, 0.0);
        assert_eq!(s.breakdown().final_total, 0.0);
    }

    #[test]
    fn test_commit_rejection_leaves_breakdown_untouched() {
        let mut s = session();
        s.add_product("1", 2, false);
        let before = s.breakdown();

        let outcome = s.commit_entry("1", 9);
        assert_eq!(
            outcome,
            BasketOutcome::Rejected {
                reason: RejectReason::InsufficientStock,
                requested: 9,
                available: 5
            }
        );
        assert_eq!(s.breakdown(), before);
    }

    #[test]
    fn test_resume_keeps_persisted_lines() {
        let mut draft = SaleDraft::new();
        let snapshot = ProductSnapshot::new(vec![test_product("1", "Blue Chair", 15.0, 10.0, 5)]);
        basket::add_product(&mut draft, &snapshot, "1", 3, false);
        draft.discount_amount = 2.0;

        let s = BasketSession::resume(snapshot, draft);
        assert_eq!(s.draft().item_count(), 1);
        assert_eq!(s.breakdown().subtotal, 45.0);
        assert_eq!(s.breakdown().discount_amount, 2.0);
    }

    #[test]
    fn test_set_customer() {
        let mut s = session();
        s.set_customer(Some("Bilal".to_string()), None);
        assert_eq!(s.draft().customer_name.as_deref(), Some("Bilal"));
        s.reset();
        assert!(s.draft().customer_name.is_none());
    }

    #[test]
    fn test_session_state_locking() {
        let state = SessionState::new(session());

        let outcome = state.with_session_mut(|s| s.add_product("2", 4, false));
        assert_eq!(outcome, BasketOutcome::Applied);

        let (count, subtotal) = state.with_session(|s| (s.draft().item_count(), s.breakdown().subtotal));
        assert_eq!(count, 1);
        assert_eq!(subtotal, 32.0);
    }
}
