//! The shopping cart and its persisted wire form.
//!
//! The cart is an ordered sequence of lines, each pairing a product
//! id with a quantity. It serializes to the bare line array
//! (`[{"id": "...", "qty": n}, ...]`), which is exactly the shape
//! persisted in the browser session under the cart namespace key.
//!
//! All operations are pure and in-memory; persistence belongs to the
//! storefront's session-backed cart store.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One product/quantity pairing in the cart.
///
/// Invariant: `qty >= 1`. A line that would drop to zero is removed,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub id: ProductId,
    /// Units of the product, always at least 1.
    pub qty: u32,
}

/// The cart aggregate: an ordered sequence of lines, at most one per
/// product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines (the nav badge number).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    /// Add `qty` units of a product.
    ///
    /// Merges into the existing line if one exists, otherwise appends
    /// a new line. Duplicate lines for one id never exist.
    pub fn add(&mut self, id: ProductId, qty: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.qty = line.qty.saturating_add(qty);
        } else if qty > 0 {
            self.lines.push(CartLine { id, qty });
        }
    }

    /// Overwrite a line's quantity in place.
    ///
    /// A quantity of zero or less removes the line. Setting a positive
    /// quantity for a product not in the cart is a no-op.
    pub fn set_qty(&mut self, id: &ProductId, qty: i64) {
        if qty <= 0 {
            self.remove(id);
            return;
        }
        let qty = u32::try_from(qty).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) {
            line.qty = qty;
        }
    }

    /// Remove the line for a product. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|line| &line.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Decode a persisted cart, treating malformed input as empty.
    ///
    /// The store never surfaces a corrupt-state error to the caller;
    /// a cart that cannot be read is a cart that does not exist.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Encode the cart to its persisted wire form.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }
}
