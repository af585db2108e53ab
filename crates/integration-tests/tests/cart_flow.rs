//! Cart flow tests: add, update, remove, clear, totals.

#![allow(clippy::unwrap_used, reason = "tests")]

use axum::http::StatusCode;
use cosmoglow_integration_tests::TestApp;

#[tokio::test]
async fn empty_cart_shows_empty_state() {
    let mut app = TestApp::new();
    let body = app.get_text("/cart").await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn add_to_cart_redirects_and_persists() {
    let mut app = TestApp::new();

    let response = app.post_form("/cart/add", "id=lipstick&qty=2&back=/shop").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/shop");

    let body = app.get_text("/cart").await;
    assert!(body.contains("25ml"));
    assert!(!body.contains("Your cart is empty"));
}

#[tokio::test]
async fn cart_totals_use_preview_shipping_fee() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=2").await; // 300
    app.post_form("/cart/add", "id=cream&qty=1").await; // 210

    let body = app.get_text("/cart").await;
    // Subtotal 510, preview fee 100, total 610.
    assert!(body.contains(r#"id="subtotal">510"#));
    assert!(body.contains(r#"id="shipping">100"#));
    assert!(body.contains(r#"id="total">610"#));
}

#[tokio::test]
async fn cart_free_shipping_above_threshold() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=cream&qty=5").await; // 1050

    let body = app.get_text("/cart").await;
    assert!(body.contains(r#"id="shipping">0"#));
    assert!(body.contains(r#"id="total">1,050"#));
}

#[tokio::test]
async fn repeated_adds_merge_into_one_line() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;
    app.post_form("/cart/add", "id=lipstick&qty=2").await;

    let body = app.get_text("/cart").await;
    assert!(body.contains(r#"value="3""#), "one line with merged quantity");
    assert_eq!(body.matches("cart-item").count(), 1);
}

#[tokio::test]
async fn update_quantity_recomputes_totals() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;
    app.post_form("/cart/update", "id=lipstick&qty=4").await;

    let body = app.get_text("/cart").await;
    assert!(body.contains(r#"id="subtotal">600"#));
}

#[tokio::test]
async fn update_to_zero_removes_line() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=2").await;
    app.post_form("/cart/update", "id=lipstick&qty=0").await;

    let body = app.get_text("/cart").await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn remove_deletes_only_that_line() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;
    app.post_form("/cart/add", "id=cream&qty=1").await;
    app.post_form("/cart/remove", "id=lipstick").await;

    let body = app.get_text("/cart").await;
    assert!(!body.contains("25ml"));
    assert!(body.contains("40ml"));
}

#[tokio::test]
async fn clear_empties_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=3").await;
    app.post_form("/cart/clear", "").await;

    let body = app.get_text("/cart").await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn nav_badge_tracks_item_count() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=2").await;
    app.post_form("/cart/add", "id=cream&qty=1").await;

    let body = app.get_text("/").await;
    assert!(body.contains(r#"id="nav-cart-count" class="badge">3"#));
}

#[tokio::test]
async fn external_redirect_targets_are_rejected() {
    let mut app = TestApp::new();
    let response = app
        .post_form("/cart/add", "id=lipstick&back=https://evil.example")
        .await;
    assert_eq!(response.headers().get("location").unwrap(), "/cart");

    // Backslash variant of a protocol-relative URL.
    let response = app
        .post_form("/cart/add", "id=lipstick&back=/%5Cevil.example")
        .await;
    assert_eq!(response.headers().get("location").unwrap(), "/cart");
}
