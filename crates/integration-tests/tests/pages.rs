//! Page rendering tests: home, shop listing, product detail.

#![allow(clippy::unwrap_used, reason = "tests")]

use axum::http::StatusCode;
use cosmoglow_integration_tests::TestApp;

#[tokio::test]
async fn health_check_returns_ok() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn home_shows_featured_products() {
    let mut app = TestApp::new();
    let body = app.get_text("/").await;

    assert!(body.contains("Shata Dhauta Ghrita Moisturizer(25ml)"));
    assert!(body.contains("Shata Dhauta Ghrita Moisturizer(40ml)"));
    // Every displayed price carries the delivery note.
    assert!(body.contains("Delivery charges extra"));
}

#[tokio::test]
async fn shop_search_is_case_insensitive() {
    let mut app = TestApp::new();

    let body = app.get_text("/shop?q=MOISTUR").await;
    assert!(body.contains("25ml"));
    assert!(body.contains("40ml"));

    let body = app.get_text("/shop?q=zzz").await;
    assert!(body.contains("No products match"));
}

#[tokio::test]
async fn shop_sorts_by_price() {
    let mut app = TestApp::new();

    let body = app.get_text("/shop?sort=price-desc").await;
    let pos_40 = body.find("40ml").unwrap();
    let pos_25 = body.find("25ml").unwrap();
    assert!(pos_40 < pos_25, "price-desc should list the 210-rupee item first");

    let body = app.get_text("/shop?sort=price-asc").await;
    let pos_40 = body.find("40ml").unwrap();
    let pos_25 = body.find("25ml").unwrap();
    assert!(pos_25 < pos_40, "price-asc should list the 150-rupee item first");
}

#[tokio::test]
async fn shop_sorts_newest_first() {
    let mut app = TestApp::new();
    let body = app.get_text("/shop?sort=new").await;
    // The 40ml cream was added later than the 25ml.
    let pos_40 = body.find("40ml").unwrap();
    let pos_25 = body.find("25ml").unwrap();
    assert!(pos_40 < pos_25);
}

#[tokio::test]
async fn product_detail_renders_requested_product() {
    let mut app = TestApp::new();
    let body = app.get_text("/products/cream").await;
    assert!(body.contains("40ml"));
    assert!(body.contains("niacinamide"));
}

#[tokio::test]
async fn unknown_product_falls_back_to_first() {
    let mut app = TestApp::new();
    let response = app.get("/products/no-such-product").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = cosmoglow_integration_tests::body_text(response).await;
    assert!(body.contains("25ml"), "fallback is the catalog's first product");
}
