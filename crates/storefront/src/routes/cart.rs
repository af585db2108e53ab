//! Cart route handlers.
//!
//! All cart mutations go through the session-backed [`CartStore`] and
//! follow the post/redirect/get pattern: the mutating request
//! persists the cart and redirects to a fresh render, so totals are
//! recomputed on every change.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use cosmoglow_core::{Cart, Catalog, ProductId, pricing};
use cosmoglow_core::pricing::ShippingSchedule;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::CartStore;
use crate::error::Result;
use crate::filters;
use crate::routes::{Chrome, chrome};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub qty: u32,
    /// Formatted unit price with the delivery-note suffix.
    pub unit_price: String,
    /// Formatted line total with the delivery-note suffix.
    pub line_total: String,
}

/// Cart totals display data for templates.
#[derive(Debug, Clone)]
pub struct CartTotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

/// Resolve cart lines against the catalog.
///
/// Lines whose product no longer exists are silently skipped, and the
/// totals cover only the resolvable lines. Shipping uses the
/// cart-page preview schedule, which intentionally differs from the
/// checkout computation.
fn resolve_lines(cart: &Cart, catalog: &Catalog) -> (Vec<CartItemView>, CartTotalsView) {
    let mut items = Vec::new();
    let mut subtotal: u64 = 0;

    for line in cart.lines() {
        let Some(product) = catalog.find(&line.id) else {
            continue;
        };
        let line_total = product.price * u64::from(line.qty);
        subtotal += line_total;
        items.push(CartItemView {
            id: product.id.to_string(),
            title: product.title.clone(),
            image: product.image.clone(),
            qty: line.qty,
            unit_price: pricing::display_price(product.price),
            line_total: pricing::display_price(line_total),
        });
    }

    let shipping = pricing::shipping_fee(subtotal, ShippingSchedule::CartPreview);
    let totals = CartTotalsView {
        subtotal: pricing::rupees(subtotal),
        shipping: pricing::rupees(shipping),
        total: pricing::rupees(subtotal + shipping),
    };

    (items, totals)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub qty: Option<u32>,
    /// Page to return to after the add (must be a local path).
    pub back: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub qty: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: Chrome,
    pub items: Vec<CartItemView>,
    pub totals: CartTotalsView,
    pub is_empty: bool,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = CartStore::new(session.clone()).load().await;
    let (items, totals) = resolve_lines(&cart, state.catalog());

    CartShowTemplate {
        chrome: chrome(&session).await,
        is_empty: items.is_empty(),
        items,
        totals,
    }
}

/// Add a product to the cart, then redirect back to the originating
/// page.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let qty = form.qty.unwrap_or(1).max(1);
    CartStore::new(session)
        .add(ProductId::from(form.id), qty)
        .await?;

    Ok(Redirect::to(local_path(form.back.as_deref(), "/cart")))
}

/// Overwrite a line's quantity. Zero or less removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    CartStore::new(session)
        .set_qty(&ProductId::from(form.id), form.qty)
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a product's line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    CartStore::new(session)
        .remove(&ProductId::from(form.id))
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    CartStore::new(session).clear().await?;
    Ok(Redirect::to("/cart"))
}

/// Constrain a redirect target to a local path.
///
/// `//host` and `/\host` are rejected: browsers treat both as
/// protocol-relative URLs.
fn local_path<'a>(back: Option<&'a str>, fallback: &'a str) -> &'a str {
    match back {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\") =>
        {
            path
        }
        _ => fallback,
    }
}
