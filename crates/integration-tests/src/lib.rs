//! Integration test harness for the CosmoGlow storefront.
//!
//! Drives the full axum router in-process via `tower::ServiceExt`,
//! with the bundled catalog and the null (simulating) order mailer.
//! The session cookie is carried between requests so the cart
//! persists across a test scenario like it does across page loads.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test harness")]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use cosmoglow_core::Catalog;
use cosmoglow_storefront::build_app;
use cosmoglow_storefront::config::StorefrontConfig;
use cosmoglow_storefront::services::mailer::OrderMailer;
use cosmoglow_storefront::state::AppState;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// A storefront instance plus the browser-side session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build a storefront with the bundled catalog and no mailer
    /// credentials (orders are simulated).
    #[must_use]
    pub fn new() -> Self {
        Self::with_mailer(OrderMailer::from_config(None).expect("null mailer"))
    }

    /// Build a storefront around a specific order mailer.
    #[must_use]
    pub fn with_mailer(mailer: OrderMailer) -> Self {
        let config = StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost".to_string(),
            upi_id: "cosmoglow@upi".to_string(),
            emailjs: None,
        };
        let state = AppState::new(config, Catalog::bundled(), mailer);

        Self {
            router: build_app(state),
            cookie: None,
        }
    }

    /// GET a page, carrying the session cookie.
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let mut request = Request::builder().uri(path).method("GET");
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        self.remember_cookie(&response);
        response
    }

    /// POST a urlencoded form, carrying the session cookie.
    pub async fn post_form(&mut self, path: &str, form: &str) -> Response<Body> {
        let mut request = Request::builder()
            .uri(path)
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::from(form.to_string())).unwrap())
            .await
            .unwrap();
        self.remember_cookie(&response);
        response
    }

    /// GET a page and return its body as text.
    pub async fn get_text(&mut self, path: &str) -> String {
        let response = self.get(path).await;
        body_text(response).await
    }

    fn remember_cookie(&mut self, response: &Response<Body>) {
        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            // Keep only the name=value pair.
            let pair = raw.split(';').next().unwrap_or(raw);
            self.cookie = Some(pair.to_string());
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
