//! Checkout flow tests against the simulating (null) mailer.

#![allow(clippy::unwrap_used, reason = "tests")]

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use cosmoglow_integration_tests::{TestApp, body_text};
use cosmoglow_storefront::config::EmailJsConfig;
use cosmoglow_storefront::services::mailer::{EmailJsMailer, OrderMailer};

const COMPLETE_FORM: &str =
    "name=Asha&address=12+MG+Road%2C+Pune&phone=9876543210&payment_ref=UPI-42&paid=on";

/// Serve a stand-in send endpoint that rejects every request, and
/// return a mailer pointed at it.
async fn rejecting_mailer() -> OrderMailer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/send", listener.local_addr().unwrap());
    let stub = Router::new().route(
        "/send",
        post(|| async { (StatusCode::BAD_GATEWAY, "downstream unavailable") }),
    );
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let config = EmailJsConfig {
        service_id: "service_x1".to_string(),
        template_id: "template_x1".to_string(),
        public_key: "pk_x1".to_string(),
        private_key: None,
    };
    OrderMailer::EmailJs(EmailJsMailer::with_endpoint(&config, endpoint).unwrap())
}

#[tokio::test]
async fn checkout_page_shows_upi_and_checkout_totals() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=2").await;
    app.post_form("/cart/add", "id=cream&qty=1").await;

    let body = app.get_text("/checkout").await;
    assert!(body.contains("cosmoglow@upi"));
    // Checkout schedule: subtotal 510, fee 49, total 559.
    assert!(body.contains("510"));
    assert!(body.contains("49"));
    assert!(body.contains("559"));
}

#[tokio::test]
async fn missing_field_rejects_and_preserves_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;

    let response = app
        .post_form(
            "/checkout",
            "name=Asha&address=&phone=9876543210&payment_ref=UPI-42&paid=on",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Please fill all fields and confirm payment"));
    // Entered values survive the re-render.
    assert!(body.contains(r#"value="Asha""#));

    let cart = app.get_text("/cart").await;
    assert!(!cart.contains("Your cart is empty"));
}

#[tokio::test]
async fn unconfirmed_payment_rejects() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;

    let response = app
        .post_form(
            "/checkout",
            "name=Asha&address=12+MG+Road&phone=9876543210&payment_ref=UPI-42",
        )
        .await;
    let body = body_text(response).await;
    assert!(body.contains("Please fill all fields and confirm payment"));
}

#[tokio::test]
async fn empty_cart_submission_rejects() {
    let mut app = TestApp::new();
    let response = app.post_form("/checkout", COMPLETE_FORM).await;
    let body = body_text(response).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn simulated_submission_succeeds_and_clears_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=2").await;
    app.post_form("/cart/add", "id=cream&qty=1").await;

    let response = app.post_form("/checkout", COMPLETE_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("simulated"));
    assert!(body.contains("CG"), "order id shown on the confirmation page");
    // Delayed redirect back to the landing page.
    assert!(body.contains(r#"content="2;url=/""#));

    let cart = app.get_text("/cart").await;
    assert!(cart.contains("Your cart is empty"));
}

#[tokio::test]
async fn rejected_send_preserves_cart_and_form_values() {
    let mut app = TestApp::with_mailer(rejecting_mailer().await);
    app.post_form("/cart/add", "id=lipstick&qty=2").await;
    app.post_form("/cart/add", "id=cream&qty=1").await;

    let response = app.post_form("/checkout", COMPLETE_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Failed to submit order"));
    // The entered details are echoed back for a retry.
    assert!(body.contains(r#"value="Asha""#));
    assert!(body.contains(r#"value="UPI-42""#));

    let cart = app.get_text("/cart").await;
    assert!(!cart.contains("Your cart is empty"));
    assert!(cart.contains(r#"id="total">610"#));
}

#[tokio::test]
async fn whitespace_only_fields_reject() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "id=lipstick&qty=1").await;

    let response = app
        .post_form(
            "/checkout",
            "name=+++&address=12+MG+Road&phone=9876543210&payment_ref=UPI-42&paid=on",
        )
        .await;
    let body = body_text(response).await;
    assert!(body.contains("Please fill all fields and confirm payment"));
}
