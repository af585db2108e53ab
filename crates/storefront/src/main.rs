//! CosmoGlow Storefront - server-rendered e-commerce site.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with Askama templates for server-side rendering
//! - Product catalog embedded at build time (no inventory backend)
//! - Cart persisted per browser session (tower-sessions)
//! - Checkout submits orders through the `EmailJS` REST API, or
//!   simulates the send when no credentials are configured
//!
//! There is no database and no payment gateway; payment is a manual
//! UPI transfer referenced in the order form.

#![cfg_attr(not(test), forbid(unsafe_code))]

use cosmoglow_core::Catalog;
use cosmoglow_storefront::config::StorefrontConfig;
use cosmoglow_storefront::services::mailer::OrderMailer;
use cosmoglow_storefront::state::AppState;
use cosmoglow_storefront::build_app;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cosmoglow_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Choose the order mailer from configuration
    let mailer = OrderMailer::from_config(config.emailjs.as_ref())
        .expect("Failed to initialize order mailer");
    if mailer.is_configured() {
        tracing::info!("Order mailer configured (EmailJS)");
    } else {
        tracing::info!("Order mailer unconfigured; orders will be simulated");
    }

    // Build application state
    let state = AppState::new(config.clone(), Catalog::bundled(), mailer);

    // Build router
    let app = build_app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
