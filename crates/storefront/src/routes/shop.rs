//! Shop listing route handler: search and sort over the catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use cosmoglow_core::SortKey;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::{Chrome, ProductCardView, chrome};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Search text, matched against title and description.
    pub q: Option<String>,
    /// Sort selector value (`price-asc`, `price-desc`, `new`).
    pub sort: Option<String>,
}

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub chrome: Chrome,
    pub products: Vec<ProductCardView>,
    /// The query text, echoed back into the search input.
    pub query: String,
    /// The selected sort key value.
    pub sort: &'static str,
    /// Where the product-card add button returns to.
    pub back_path: &'static str,
}

/// Display the shop listing. Filter applies before sort.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(listing): Query<ListingQuery>,
) -> ShopTemplate {
    let query = listing.q.unwrap_or_default();
    let sort = SortKey::parse(listing.sort.as_deref().unwrap_or_default());

    let products = state
        .catalog()
        .listing(&query, sort)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    ShopTemplate {
        chrome: chrome(&session).await,
        products,
        query,
        sort: sort.as_str(),
        back_path: "/shop",
    }
}
