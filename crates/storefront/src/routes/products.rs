//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use cosmoglow_core::{Product, ProductId, pricing};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::{Chrome, chrome};
use crate::state::AppState;

/// Product detail display data for templates.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub tag: String,
    pub description: String,
    /// Formatted price with the delivery-note suffix.
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            tag: product.tag.clone(),
            description: product.description.clone(),
            price: pricing::display_price(product.price),
            image: product.image.clone(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub chrome: Chrome,
    pub product: ProductDetailView,
}

/// Display a product's detail page.
///
/// An unknown id falls back to the catalog's first product rather
/// than a not-found page; the quantity counter on the page is bounded
/// below at 1 client-side.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .find(&ProductId::from(id))
        .or_else(|| catalog.first())
        .ok_or_else(|| AppError::NotFound("catalog is empty".to_string()))?;

    Ok(ProductShowTemplate {
        chrome: chrome(&session).await,
        product: ProductDetailView::from(product),
    })
}
