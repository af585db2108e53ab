//! Session-backed cart store.
//!
//! The cart is the only mutable state in the storefront. It is owned
//! by the browser session and every mutation re-persists the full
//! line sequence under the fixed namespace key. Absent or corrupt
//! persisted state loads as an empty cart; a load never fails to the
//! caller.
//!
//! The store is constructed per request around the extracted
//! `Session` and passed explicitly to whatever needs it - there is no
//! global cart singleton.

use cosmoglow_core::{Cart, ProductId};
use tower_sessions::Session;

use crate::error::Result;
use crate::flash;

/// Fixed storage namespace for the serialized cart.
pub const CART_KEY: &str = "cosmoglow_cart_v1";

/// Per-request handle to the session-persisted cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    session: Session,
}

impl CartStore {
    /// Wrap the request session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the persisted cart.
    ///
    /// Absent or undeserializable state yields an empty cart. Corrupt
    /// state is logged and discarded, never surfaced.
    pub async fn load(&self) -> Cart {
        match self.session.get::<Cart>(CART_KEY).await {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Discarding unreadable cart state: {e}");
                Cart::new()
            }
        }
    }

    /// Persist the full cart, overwriting prior content.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn save(&self, cart: &Cart) -> Result<()> {
        self.session.insert(CART_KEY, cart).await?;
        Ok(())
    }

    /// Add `qty` units of a product and notify the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn add(&self, id: ProductId, qty: u32) -> Result<Cart> {
        let mut cart = self.load().await;
        cart.add(id, qty);
        self.save(&cart).await?;
        flash::set(&self.session, "Added to cart").await;
        Ok(cart)
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// Used for live quantity-field edits, so no notification is
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn set_qty(&self, id: &ProductId, qty: i64) -> Result<Cart> {
        let mut cart = self.load().await;
        cart.set_qty(id, qty);
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Remove a product's line and notify the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn remove(&self, id: &ProductId) -> Result<Cart> {
        let mut cart = self.load().await;
        cart.remove(id);
        self.save(&cart).await?;
        flash::set(&self.session, "Removed from cart").await;
        Ok(cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn clear(&self) -> Result<Cart> {
        let cart = Cart::new();
        self.save(&cart).await?;
        Ok(cart)
    }
}
