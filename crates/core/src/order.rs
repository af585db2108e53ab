//! The ephemeral order aggregate built at checkout time.
//!
//! An order exists only for the duration of one submit attempt. It is
//! never persisted: on success the cart is cleared and the order is
//! discarded.

use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::pricing::{ShippingSchedule, shipping_fee};
use crate::types::ProductId;

/// Customer details collected by the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Manually entered UPI payment reference.
    pub payment_ref: String,
}

/// One order line item, as emailed in the items JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub title: String,
    pub qty: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: u64,
    pub total: u64,
}

/// The computed summary of one checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Client-generated identifier, e.g. `CG00421378`.
    pub id: String,
    pub customer: CustomerDetails,
    pub items: Vec<OrderItem>,
    /// Sum of line totals, whole rupees.
    pub subtotal: u64,
    /// Checkout shipping fee (49 at or below the free threshold).
    pub shipping: u64,
    /// Subtotal plus shipping.
    pub total: u64,
}

impl Order {
    /// Build an order by joining the cart with the catalog.
    ///
    /// Lines whose product no longer exists in the catalog are
    /// skipped. Shipping uses the checkout schedule, which differs
    /// from the cart-page preview.
    #[must_use]
    pub fn build(id: String, customer: CustomerDetails, cart: &Cart, catalog: &Catalog) -> Self {
        let items: Vec<OrderItem> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let product = catalog.find(&line.id)?;
                Some(OrderItem {
                    id: product.id.clone(),
                    title: product.title.clone(),
                    qty: line.qty,
                    unit_price: product.price,
                    total: product.price * u64::from(line.qty),
                })
            })
            .collect();

        let subtotal: u64 = items.iter().map(|item| item.total).sum();
        let shipping = shipping_fee(subtotal, ShippingSchedule::Checkout);

        Self {
            id,
            customer,
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// The pretty-printed items array included in the order email.
    #[must_use]
    pub fn items_json(&self) -> String {
        serde_json::to_string_pretty(&self.items).unwrap_or_else(|_| "[]".to_string())
    }
}
