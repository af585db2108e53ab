//! The embedded product catalog and its listing policies.
//!
//! The catalog is a read-only ordered sequence of products defined at
//! build time. There is no inventory backend; the process lifetime is
//! the catalog lifetime.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::ProductId;

/// A purchasable product.
///
/// Prices are whole rupees; there are no minor units.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Short marketing description.
    pub description: String,
    /// Display badge (e.g. "Best Seller").
    pub tag: String,
    /// Price in whole rupees.
    pub price: u64,
    /// Image path relative to the static root.
    pub image: String,
    /// Date the product was added, used only for newest-first sorting.
    pub created_at: NaiveDate,
}

/// Sort keys accepted by the shop listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order (no sorting).
    #[default]
    Default,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently added first.
    Newest,
}

impl SortKey {
    /// Parse a sort selector value. Unknown values fall back to
    /// catalog order rather than failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "new" => Self::Newest,
            _ => Self::Default,
        }
    }

    /// The selector value for this key, as used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "new",
        }
    }
}

/// The read-only, ordered product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// Callers are responsible for id uniqueness; the bundled catalog
    /// upholds it by construction.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The catalog shipped with the storefront.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(vec![
            Product {
                id: ProductId::from("lipstick"),
                title: "Shata Dhauta Ghrita Moisturizer(25ml)".to_string(),
                description: "Creamy, long-wear formula enriched with Vitamin E.".to_string(),
                tag: "Best Seller".to_string(),
                price: 150,
                image: "images/lipstick.jpg".to_string(),
                created_at: date(2025, 8, 1),
            },
            Product {
                id: ProductId::from("cream"),
                title: "Shata Dhauta Ghrita Moisturizer(40ml)".to_string(),
                description: "Hydrates and brightens with niacinamide and aloe vera.".to_string(),
                tag: "New".to_string(),
                price: 210,
                image: "images/cream.jpg".to_string(),
                created_at: date(2025, 8, 15),
            },
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The first product in catalog order, used as the product-detail
    /// fallback when the requested id is absent or unknown.
    #[must_use]
    pub fn first(&self) -> Option<&Product> {
        self.products.first()
    }

    /// A fixed-size prefix of the catalog, for the home page.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        self.products.get(..count.min(self.products.len())).unwrap_or_default()
    }

    /// Shop listing: filter, then sort.
    ///
    /// The filter is a case-insensitive substring match against title
    /// OR description; a blank query matches everything. `Default`
    /// keeps catalog order.
    #[must_use]
    pub fn listing(&self, query: &str, sort: SortKey) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        let mut list: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect();

        match sort {
            SortKey::Default => {}
            SortKey::PriceAsc => list.sort_by_key(|p| p.price),
            SortKey::PriceDesc => list.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Newest => list.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        list
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
