//! In-memory shopping cart state machine.
//!
//! The cart for one browsing session is a plain list of line items with a
//! total derived on every read. Mutation goes through [`reduce`], an
//! explicit state-transition function, so the semantics can be tested in
//! isolation from any web plumbing.
//!
//! # Scoping
//!
//! A [`CartProvider`] owns the state for one session. Consumers hold
//! [`CartHandle`]s, which keep only a weak reference: once the provider is
//! dropped, every operation on a leftover handle fails with
//! [`CartAccessError`]. Using a cart outside a live provider scope is a
//! programming error, not a user-facing condition, and it fails loudly
//! instead of returning a default cart.
//!
//! # Example
//!
//! ```rust
//! use gearhouse_core::cart::{CartLineItem, CartProvider};
//! use gearhouse_core::types::RecordId;
//! use rust_decimal::Decimal;
//!
//! let provider = CartProvider::new();
//! let cart = provider.handle();
//!
//! cart.add_item(CartLineItem {
//!     id: RecordId::from(1),
//!     slug: "impact-wrench".to_string(),
//!     name: "Impact Wrench".to_string(),
//!     price: Decimal::new(1000, 2),
//!     quantity: 1,
//!     sku: None,
//!     vendor_id: None,
//!     category_id: None,
//! })?;
//! assert_eq!(cart.total()?, Decimal::new(1000, 2));
//! # Ok::<(), gearhouse_core::cart::CartAccessError>(())
//! ```

use std::sync::{Arc, Mutex, PoisonError, Weak};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A single line in the shopping cart.
///
/// At most one line exists per `id`; adding the same id again merges
/// quantities instead of appending a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: RecordId,
    pub slug: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    pub sku: Option<String>,
    pub vendor_id: Option<RecordId>,
    pub category_id: Option<RecordId>,
}

impl CartLineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The full cart contents, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of price times quantity across all lines.
    ///
    /// Derived on every read, never stored. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

/// A cart mutation.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Append the item, or merge quantities if the id is already present.
    Add(CartLineItem),
    /// Delete the matching line. No-op if absent.
    Remove { id: RecordId },
    /// Replace the quantity of the matching line. No-op if absent.
    ///
    /// The quantity is taken as given: zero and negative values are a
    /// caller-level policy question and are not rejected here. A
    /// degenerate line stays in the cart and still counts toward the
    /// total.
    SetQuantity { id: RecordId, quantity: i64 },
    /// Reset to an empty cart.
    Clear,
}

/// Apply one action to a cart state, producing the next state.
#[must_use]
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    let mut items = state.items;
    match action {
        CartAction::Add(incoming) => {
            if let Some(existing) = items.iter_mut().find(|item| item.id == incoming.id) {
                // Merge: keep every field of the existing entry, only the
                // quantity grows.
                existing.quantity += incoming.quantity;
            } else {
                items.push(incoming);
            }
        }
        CartAction::Remove { id } => {
            items.retain(|item| item.id != id);
        }
        CartAction::SetQuantity { id, quantity } => {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.quantity = quantity;
            }
        }
        CartAction::Clear => items.clear(),
    }
    CartState { items }
}

/// Error returned when a cart is used outside a live provider scope.
///
/// This signals a precondition violation in the calling code - a handle
/// outlived its [`CartProvider`] - and is never expected during normal
/// request handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cart accessed outside of an active cart scope")]
pub struct CartAccessError;

/// Owner of one session's cart state.
///
/// Dropping the provider ends the scope: the state is gone and every
/// outstanding [`CartHandle`] starts failing.
#[derive(Debug)]
pub struct CartProvider {
    state: Arc<Mutex<CartState>>,
}

impl CartProvider {
    /// Create a provider with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CartState::default())),
        }
    }

    /// Issue a handle scoped to this provider's lifetime.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            state: Arc::downgrade(&self.state),
        }
    }
}

impl Default for CartProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap, cloneable access to a provider's cart.
///
/// All operations return [`CartAccessError`] once the provider is gone.
#[derive(Debug, Clone)]
pub struct CartHandle {
    state: Weak<Mutex<CartState>>,
}

impl CartHandle {
    fn with<R>(&self, f: impl FnOnce(&mut CartState) -> R) -> Result<R, CartAccessError> {
        let state = self.state.upgrade().ok_or(CartAccessError)?;
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut guard))
    }

    fn dispatch(&self, action: CartAction) -> Result<(), CartAccessError> {
        self.with(|state| {
            *state = reduce(std::mem::take(state), action);
        })
    }

    /// Add a line item, merging quantities on duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn add_item(&self, item: CartLineItem) -> Result<(), CartAccessError> {
        self.dispatch(CartAction::Add(item))
    }

    /// Remove the line with the given id, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn remove_item(&self, id: &RecordId) -> Result<(), CartAccessError> {
        self.dispatch(CartAction::Remove { id: id.clone() })
    }

    /// Set the quantity of the line with the given id, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn set_quantity(&self, id: &RecordId, quantity: i64) -> Result<(), CartAccessError> {
        self.dispatch(CartAction::SetQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn clear(&self) -> Result<(), CartAccessError> {
        self.dispatch(CartAction::Clear)
    }

    /// Snapshot of the current line items.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn items(&self) -> Result<Vec<CartLineItem>, CartAccessError> {
        self.with(|state| state.items().to_vec())
    }

    /// Current cart total.
    ///
    /// # Errors
    ///
    /// Returns [`CartAccessError`] if the provider scope has ended.
    pub fn total(&self) -> Result<Decimal, CartAccessError> {
        self.with(|state| CartState::total(state))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i64, price: Decimal, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: RecordId::from(id),
            slug: format!("item-{id}"),
            name: format!("Item {id}"),
            price,
            quantity,
            sku: None,
            vendor_id: None,
            category_id: None,
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(CartState::default().total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_distinct_ids() {
        let mut state = CartState::default();
        state = reduce(state, CartAction::Add(line(1, Decimal::new(500, 2), 1)));
        state = reduce(state, CartAction::Add(line(2, Decimal::new(250, 2), 2)));
        state = reduce(state, CartAction::Add(line(3, Decimal::new(100, 2), 3)));

        assert_eq!(state.len(), 3);
        // 5.00 + 2*2.50 + 3*1.00
        assert_eq!(state.total(), Decimal::new(1300, 2));
    }

    #[test]
    fn test_add_same_id_merges_quantities() {
        let mut state = CartState::default();
        state = reduce(state, CartAction::Add(line(1, Decimal::new(1000, 2), 1)));
        state = reduce(state, CartAction::Add(line(1, Decimal::new(1000, 2), 2)));

        assert_eq!(state.len(), 1);
        let item = &state.items()[0];
        assert_eq!(item.quantity, 3);
        assert_eq!(state.total(), Decimal::new(3000, 2));
    }

    #[test]
    fn test_merge_keeps_existing_fields() {
        let mut state = CartState::default();
        let mut first = line(1, Decimal::new(1000, 2), 1);
        first.sku = Some("SKU-1".to_string());
        state = reduce(state, CartAction::Add(first));

        // Same id arriving with different metadata: only quantity changes.
        let mut second = line(1, Decimal::new(9999, 2), 4);
        second.name = "Renamed".to_string();
        second.sku = None;
        state = reduce(state, CartAction::Add(second));

        let item = &state.items()[0];
        assert_eq!(item.quantity, 5);
        assert_eq!(item.price, Decimal::new(1000, 2));
        assert_eq!(item.name, "Item 1");
        assert_eq!(item.sku.as_deref(), Some("SKU-1"));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut state = CartState::default();
        for id in [3, 1, 2] {
            state = reduce(state, CartAction::Add(line(id, Decimal::ONE, 1)));
        }
        let ids: Vec<_> = state.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(
            ids,
            vec![RecordId::from(3), RecordId::from(1), RecordId::from(2)]
        );
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let empty = reduce(
            CartState::default(),
            CartAction::Remove {
                id: RecordId::from(9),
            },
        );
        assert!(empty.is_empty());

        let mut state = reduce(
            CartState::default(),
            CartAction::Add(line(1, Decimal::ONE, 1)),
        );
        let before = state.clone();
        state = reduce(
            state,
            CartAction::Remove {
                id: RecordId::from(9),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_last_item_empties_cart() {
        let mut state = reduce(
            CartState::default(),
            CartAction::Add(line(1, Decimal::ONE, 1)),
        );
        state = reduce(
            state,
            CartAction::Remove {
                id: RecordId::from(1),
            },
        );
        assert!(state.is_empty());
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn test_set_quantity_absent_id_is_noop() {
        let state = reduce(
            CartState::default(),
            CartAction::SetQuantity {
                id: RecordId::from(1),
                quantity: 5,
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_keeps_line() {
        // Quantity floor enforcement is a caller-level decision; the store
        // keeps degenerate lines as-is.
        let mut state = reduce(
            CartState::default(),
            CartAction::Add(line(1, Decimal::new(400, 2), 2)),
        );
        state = reduce(
            state,
            CartAction::SetQuantity {
                id: RecordId::from(1),
                quantity: 0,
            },
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.total(), Decimal::ZERO);

        state = reduce(
            state,
            CartAction::SetQuantity {
                id: RecordId::from(1),
                quantity: -2,
            },
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.total(), Decimal::new(-800, 2));
    }

    #[test]
    fn test_clear_resets_regardless_of_prior_state() {
        let mut state = CartState::default();
        for id in 1..=4 {
            state = reduce(state, CartAction::Add(line(id, Decimal::TEN, id)));
        }
        state = reduce(state, CartAction::Clear);
        assert!(state.is_empty());
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn test_handle_end_to_end() {
        let provider = CartProvider::new();
        let cart = provider.handle();

        cart.add_item(line(1, Decimal::TEN, 1)).unwrap();
        cart.add_item(line(1, Decimal::TEN, 2)).unwrap();

        let items = cart.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(cart.total().unwrap(), Decimal::new(3000, 2));
    }

    #[test]
    fn test_handles_share_one_store() {
        let provider = CartProvider::new();
        let a = provider.handle();
        let b = provider.handle();

        a.add_item(line(1, Decimal::ONE, 1)).unwrap();
        assert_eq!(b.items().unwrap().len(), 1);

        b.clear().unwrap();
        assert!(a.items().unwrap().is_empty());
    }

    #[test]
    fn test_independent_providers_do_not_share_state() {
        let first = CartProvider::new();
        let second = CartProvider::new();

        first.handle().add_item(line(1, Decimal::ONE, 1)).unwrap();
        assert!(second.handle().items().unwrap().is_empty());
    }

    #[test]
    fn test_handle_fails_after_provider_dropped() {
        let provider = CartProvider::new();
        let cart = provider.handle();
        cart.add_item(line(1, Decimal::ONE, 1)).unwrap();

        drop(provider);

        assert_eq!(cart.items(), Err(CartAccessError));
        assert_eq!(cart.total(), Err(CartAccessError));
        assert_eq!(cart.add_item(line(2, Decimal::ONE, 1)), Err(CartAccessError));
        assert_eq!(cart.clear(), Err(CartAccessError));
    }
}
