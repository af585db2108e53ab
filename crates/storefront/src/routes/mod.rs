//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (featured products)
//! GET  /health           - Health check
//!
//! # Shop
//! GET  /shop             - Product listing with search + sort
//! GET  /products/{id}    - Product detail
//!
//! # Cart
//! GET  /cart             - Cart page with totals preview
//! POST /cart/add         - Add product (redirects back)
//! POST /cart/update      - Overwrite line quantity
//! POST /cart/remove      - Remove line
//! POST /cart/clear       - Empty the cart
//!
//! # Checkout
//! GET  /checkout         - Payment page (UPI details + order form)
//! POST /checkout         - Validate and submit the order
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};
use cosmoglow_core::{Product, pricing};
use tower_sessions::Session;

use crate::cart_store::CartStore;
use crate::flash;
use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::show))
        .route("/shop", get(shop::index))
        .route("/products/{id}", get(products::show))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", get(checkout::show).post(checkout::submit))
}

/// Shared page chrome: the nav cart badge and the pending toast.
///
/// Rebuilt on every render, so the badge always reflects the
/// persisted cart after the handler's mutations.
#[derive(Debug, Clone)]
pub struct Chrome {
    /// Total unit count across cart lines.
    pub cart_count: u64,
    /// One-shot notification taken from the session.
    pub toast: Option<String>,
}

/// Build the page chrome for the current session.
pub async fn chrome(session: &Session) -> Chrome {
    let cart = CartStore::new(session.clone()).load().await;
    Chrome {
        cart_count: cart.item_count(),
        toast: flash::take(session).await,
    }
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    /// Formatted price with the delivery-note suffix.
    pub price: String,
    pub image: String,
    pub tag: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: pricing::display_price(product.price),
            image: product.image.clone(),
            tag: product.tag.clone(),
        }
    }
}
