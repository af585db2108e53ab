//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::{Chrome, ProductCardView, chrome};
use crate::state::AppState;

/// Number of catalog entries shown on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub products: Vec<ProductCardView>,
    /// Where the product-card add button returns to.
    pub back_path: &'static str,
}

/// Display the home page: a fixed-size prefix of the catalog, no
/// filter or sort.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> HomeTemplate {
    let products = state
        .catalog()
        .featured(FEATURED_COUNT)
        .iter()
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        chrome: chrome(&session).await,
        products,
        back_path: "/",
    }
}
