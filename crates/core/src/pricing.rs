//! Shipping rules and rupee formatting.
//!
//! Shipping is free above a fixed subtotal threshold; below or at it
//! a flat fee applies. The cart-page preview and the checkout
//! computation use different flat fees at the same threshold. Both
//! literals are reproduced as observed; they are intentionally not
//! unified.

/// Subtotal above which shipping is free, in whole rupees.
pub const FREE_SHIPPING_THRESHOLD: u64 = 999;

/// Flat fee shown on the cart-page totals preview.
pub const CART_PREVIEW_FEE: u64 = 100;

/// Flat fee charged by the checkout computation.
pub const CHECKOUT_FEE: u64 = 49;

/// Which of the two divergent shipping computations applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingSchedule {
    /// The cart-page totals preview.
    CartPreview,
    /// The checkout/order computation.
    Checkout,
}

/// The shipping fee for a subtotal under the given schedule.
#[must_use]
pub const fn shipping_fee(subtotal: u64, schedule: ShippingSchedule) -> u64 {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        return 0;
    }
    match schedule {
        ShippingSchedule::CartPreview => CART_PREVIEW_FEE,
        ShippingSchedule::Checkout => CHECKOUT_FEE,
    }
}

/// Format a rupee amount with en-IN digit grouping.
///
/// The last three digits form one group; every group before it has
/// two digits: `1234567` formats as `"12,34,567"`.
#[must_use]
pub fn rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<String> = Vec::new();
    let head_chars: Vec<char> = head.chars().collect();
    let mut idx = head_chars.len();
    while idx > 0 {
        let start = idx.saturating_sub(2);
        groups.push(head_chars.get(start..idx).unwrap_or_default().iter().collect());
        idx = start;
    }
    groups.reverse();
    groups.push(tail.to_string());
    groups.join(",")
}

/// Display form of a price: the rupee figure plus the fixed note that
/// delivery charges are extra.
#[must_use]
pub fn display_price(amount: u64) -> String {
    format!("\u{20b9} {} + Delivery charges extra", rupees(amount))
}
