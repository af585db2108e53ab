//! Checkout flow: validate the order form, build the order, submit it
//! through the order mailer.
//!
//! The flow is stateless across requests: each submit runs
//! validation, then the awaited send, then lands in one of the
//! terminal outcomes. Validation failures and send failures both
//! leave the cart untouched and return an interactive page; only a
//! successful (real or simulated) send clears the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use cosmoglow_core::pricing::{self, ShippingSchedule};
use cosmoglow_core::{Cart, Catalog, CustomerDetails, Order};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::CartStore;
use crate::error::Result;
use crate::filters;
use crate::flash;
use crate::routes::cart::CartTotalsView;
use crate::routes::{Chrome, chrome};
use crate::services::mailer::{OrderEmail, SendOutcome};
use crate::state::AppState;

/// Order form fields, as posted.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment_ref: String,
    /// Checkbox: present only when checked.
    pub paid: Option<String>,
}

/// Trimmed form values, echoed back into the page on re-render so a
/// failed submit preserves what the customer typed.
#[derive(Debug, Clone, Default)]
pub struct OrderFormValues {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment_ref: String,
    pub paid: bool,
}

impl OrderFormValues {
    /// All required fields filled and payment confirmed.
    #[must_use]
    pub fn complete(&self) -> bool {
        !self.name.is_empty()
            && !self.address.is_empty()
            && !self.phone.is_empty()
            && !self.payment_ref.is_empty()
            && self.paid
    }
}

impl From<&OrderForm> for OrderFormValues {
    fn from(form: &OrderForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            phone: form.phone.trim().to_string(),
            payment_ref: form.payment_ref.trim().to_string(),
            paid: form.paid.is_some(),
        }
    }
}

/// Payment page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub chrome: Chrome,
    pub upi_id: String,
    pub totals: CartTotalsView,
    pub cart_empty: bool,
    pub form: OrderFormValues,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub chrome: Chrome,
    pub order_id: String,
    /// True when the mailer was unconfigured and the send was
    /// simulated.
    pub simulated: bool,
}

/// Display the payment page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CheckoutTemplate {
    render_payment(&state, &session, OrderFormValues::default()).await
}

/// Validate and submit the order.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let store = CartStore::new(session.clone());
    let cart = store.load().await;
    let values = OrderFormValues::from(&form);

    // Validating: any violation returns to the form with a message
    // and no partial submission.
    if !values.complete() {
        flash::set(&session, "Please fill all fields and confirm payment").await;
        return Ok(render_payment(&state, &session, values).await.into_response());
    }
    if cart.is_empty() {
        flash::set(&session, "Cart is empty").await;
        return Ok(render_payment(&state, &session, values).await.into_response());
    }

    // Submitting: build the ephemeral order and dispatch it.
    let customer = CustomerDetails {
        name: values.name.clone(),
        address: values.address.clone(),
        phone: values.phone.clone(),
        payment_ref: values.payment_ref.clone(),
    };
    let order = Order::build(generate_order_id(), customer, &cart, state.catalog());
    let email = order_email(&order);

    match state.mailer().send(&email).await {
        Ok(outcome) => {
            // Succeeded (or simulated): the cart is cleared and the
            // confirmation page redirects home after a short delay.
            store.clear().await?;
            Ok(CheckoutSuccessTemplate {
                chrome: Chrome {
                    cart_count: 0,
                    toast: None,
                },
                order_id: order.id,
                simulated: outcome == SendOutcome::Simulated,
            }
            .into_response())
        }
        Err(e) => {
            // Failed: cart and form state preserved for retry.
            tracing::error!("Failed to submit order {}: {e}", order.id);
            flash::set(&session, "Failed to submit order. Try again.").await;
            Ok(render_payment(&state, &session, values).await.into_response())
        }
    }
}

/// Build the payment page from the current cart.
async fn render_payment(
    state: &AppState,
    session: &Session,
    form: OrderFormValues,
) -> CheckoutTemplate {
    let cart = CartStore::new(session.clone()).load().await;
    let totals = checkout_totals(&cart, state.catalog());

    CheckoutTemplate {
        chrome: chrome(session).await,
        upi_id: state.config().upi_id.clone(),
        cart_empty: cart.is_empty(),
        totals,
        form,
    }
}

/// Totals preview using the checkout shipping schedule (which differs
/// from the cart-page preview fee).
fn checkout_totals(cart: &Cart, catalog: &Catalog) -> CartTotalsView {
    let subtotal: u64 = cart
        .lines()
        .iter()
        .filter_map(|line| {
            catalog
                .find(&line.id)
                .map(|p| p.price * u64::from(line.qty))
        })
        .sum();
    let shipping = pricing::shipping_fee(subtotal, ShippingSchedule::Checkout);

    CartTotalsView {
        subtotal: pricing::rupees(subtotal),
        shipping: pricing::rupees(shipping),
        total: pricing::rupees(subtotal + shipping),
    }
}

/// Generate a fixed-width order identifier: `CG` plus an 8-digit
/// zero-padded random number.
fn generate_order_id() -> String {
    let n: u64 = rand::rng().random_range(0..100_000_000);
    format!("CG{n:08}")
}

/// Build the templated email payload from the order.
fn order_email(order: &Order) -> OrderEmail {
    OrderEmail {
        order_id: order.id.clone(),
        name: order.customer.name.clone(),
        address: order.customer.address.clone(),
        phone: order.customer.phone.clone(),
        payment_ref: order.customer.payment_ref.clone(),
        subtotal: format!("\u{20b9} {}", pricing::rupees(order.subtotal)),
        shipping: format!("\u{20b9} {}", pricing::rupees(order.shipping)),
        total: format!("\u{20b9} {}", pricing::rupees(order.total)),
        items_json: order.items_json(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cosmoglow_core::ProductId;

    use super::*;

    #[test]
    fn test_order_id_format() {
        for _ in 0..32 {
            let id = generate_order_id();
            assert_eq!(id.len(), 10);
            assert!(id.starts_with("CG"));
            assert!(id.chars().skip(2).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_form_values_require_every_field() {
        let complete = OrderFormValues {
            name: "Asha".to_string(),
            address: "12 MG Road".to_string(),
            phone: "9876543210".to_string(),
            payment_ref: "UPI-42".to_string(),
            paid: true,
        };
        assert!(complete.complete());

        let unpaid = OrderFormValues {
            paid: false,
            ..complete.clone()
        };
        assert!(!unpaid.complete());

        let blank_name = OrderFormValues {
            name: String::new(),
            ..complete
        };
        assert!(!blank_name.complete());
    }

    #[test]
    fn test_form_values_trim_whitespace() {
        let form = OrderForm {
            name: "  Asha ".to_string(),
            address: " 12 MG Road ".to_string(),
            phone: "  ".to_string(),
            payment_ref: "UPI-42".to_string(),
            paid: Some("on".to_string()),
        };
        let values = OrderFormValues::from(&form);
        assert_eq!(values.name, "Asha");
        // Whitespace-only fields count as empty.
        assert!(!values.complete());
    }

    #[test]
    fn test_checkout_totals_fee_diverges_from_preview() {
        let catalog = Catalog::bundled();
        let mut cart = Cart::new();
        cart.add(ProductId::from("lipstick"), 2);
        cart.add(ProductId::from("cream"), 1);

        let totals = checkout_totals(&cart, &catalog);
        assert_eq!(totals.subtotal, "510");
        assert_eq!(totals.shipping, "49");
        assert_eq!(totals.total, "559");
    }

    #[test]
    fn test_order_email_formats_rupee_strings() {
        let catalog = Catalog::bundled();
        let mut cart = Cart::new();
        cart.add(ProductId::from("lipstick"), 2);
        cart.add(ProductId::from("cream"), 1);
        let order = Order::build(
            "CG00000001".to_string(),
            CustomerDetails {
                name: "Asha".to_string(),
                address: "12 MG Road".to_string(),
                phone: "9876543210".to_string(),
                payment_ref: "UPI-42".to_string(),
            },
            &cart,
            &catalog,
        );

        let email = order_email(&order);
        assert_eq!(email.subtotal, "\u{20b9} 510");
        assert_eq!(email.shipping, "\u{20b9} 49");
        assert_eq!(email.total, "\u{20b9} 559");
        assert!(email.items_json.contains("unitPrice"));
    }
}
