//! Application state shared across handlers.

use std::sync::Arc;

use cosmoglow_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::mailer::OrderMailer;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the embedded catalog, and the order mailer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    mailer: OrderMailer,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mailer is chosen from configuration: the `EmailJS` client
    /// when credentials are present, the null (simulating) mailer
    /// otherwise.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, mailer: OrderMailer) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                mailer,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order mailer.
    #[must_use]
    pub fn mailer(&self) -> &OrderMailer {
        &self.inner.mailer
    }
}
