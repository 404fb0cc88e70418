//! Session-scoped cart provisioning and the product-to-cart adapter.
//!
//! Each browser session gets its own [`CartProvider`], tracked in a
//! [`CartSessions`] registry keyed by a UUID stored in the session cookie.
//! Nothing is persisted: carts live exactly as long as the process, and a
//! new session key means a fresh, empty cart.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use gearhouse_core::cart::{CartAccessError, CartHandle, CartLineItem, CartProvider};
use tower_sessions::Session;
use uuid::Uuid;

use crate::catalog::ProductRecord;

/// Session keys used by the storefront.
pub mod session_keys {
    /// UUID of the session's cart in the [`super::CartSessions`] registry.
    pub const CART_KEY: &str = "cart.key";
}

/// Registry of live cart scopes, one per browser session.
///
/// Providers are created lazily on first use and dropped with the
/// registry; there is no eviction, matching the cart's
/// lifetime-of-the-process contract.
#[derive(Debug, Default)]
pub struct CartSessions {
    carts: Mutex<HashMap<Uuid, CartProvider>>,
}

impl CartSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the cart for the given session key, provisioning an
    /// empty cart if this key has none yet.
    #[must_use]
    pub fn handle(&self, key: Uuid) -> CartHandle {
        let mut carts = self
            .carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        carts.entry(key).or_default().handle()
    }

    /// Drop the cart scope for a session key, invalidating its handles.
    pub fn end_scope(&self, key: Uuid) {
        let mut carts = self
            .carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        carts.remove(&key);
    }

    /// Number of live cart scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Get the cart key from the session, minting one on first use.
///
/// # Errors
///
/// Returns an error if the session store rejects the read or write.
pub async fn cart_key(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(key) = session.get::<Uuid>(session_keys::CART_KEY).await? {
        return Ok(key);
    }

    let key = Uuid::new_v4();
    session.insert(session_keys::CART_KEY, key).await?;
    Ok(key)
}

/// Add a fetched product to the cart as a single-quantity line.
///
/// A product without a price cannot be purchased: the add is suppressed
/// entirely and `Ok(false)` is returned, with no error and no partial
/// line item.
///
/// # Errors
///
/// Returns [`CartAccessError`] if the cart scope has ended.
pub fn add_to_cart(cart: &CartHandle, product: &ProductRecord) -> Result<bool, CartAccessError> {
    let Some(price) = product.price else {
        return Ok(false);
    };

    cart.add_item(CartLineItem {
        id: product.id.clone(),
        slug: product.slug.clone(),
        name: product.name.clone(),
        price,
        quantity: 1,
        sku: product.sku.clone(),
        vendor_id: product.vendor_id.clone(),
        category_id: product.category_id.clone(),
    })?;
    Ok(true)
}
