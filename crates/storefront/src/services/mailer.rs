//! Order mailer: the checkout's email-delivery collaborator.
//!
//! Orders are delivered through the `EmailJS` REST API. When no live
//! credentials are configured the storefront falls back to the null
//! mailer, which logs the payload for operator inspection and reports
//! a simulated success. The fallback is a deliberate development
//! mode, not a failure path.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::config::EmailJsConfig;

/// `EmailJS` REST endpoint.
const SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Hard timeout on the send request.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when sending an order email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// How a send concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The collaborator accepted the email.
    Delivered,
    /// No collaborator configured; the payload was logged instead.
    Simulated,
}

/// The templated order payload, sent as `EmailJS` template params.
#[derive(Debug, Clone, Serialize)]
pub struct OrderEmail {
    pub order_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment_ref: String,
    /// Formatted subtotal, e.g. `"₹ 510"`.
    pub subtotal: String,
    /// Formatted shipping fee.
    pub shipping: String,
    /// Formatted grand total.
    pub total: String,
    /// Pretty-printed JSON array of the order items.
    pub items_json: String,
}

/// The configuration-injected order mailer.
#[derive(Debug, Clone)]
pub enum OrderMailer {
    /// Live `EmailJS` delivery.
    EmailJs(EmailJsMailer),
    /// Development/test fallback: log and simulate.
    Null(NullMailer),
}

impl OrderMailer {
    /// Choose the mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: Option<&EmailJsConfig>) -> Result<Self, MailerError> {
        match config {
            Some(emailjs) => Ok(Self::EmailJs(EmailJsMailer::new(emailjs)?)),
            None => Ok(Self::Null(NullMailer)),
        }
    }

    /// Whether a live collaborator is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::EmailJs(_))
    }

    /// Send the order email.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured collaborator rejects or the
    /// request fails. The null mailer never errors.
    pub async fn send(&self, email: &OrderEmail) -> Result<SendOutcome, MailerError> {
        match self {
            Self::EmailJs(mailer) => mailer.send(email).await,
            Self::Null(mailer) => Ok(mailer.send(email)),
        }
    }
}

/// `EmailJS` REST API client.
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<SecretString>,
}

/// Request body for the `EmailJS` send endpoint.
#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a OrderEmail,
}

impl EmailJsMailer {
    /// Create a new `EmailJS` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &EmailJsConfig) -> Result<Self, MailerError> {
        Self::with_endpoint(config, SEND_URL)
    }

    /// Create a client that posts to `endpoint` instead of the live
    /// `EmailJS` API. Used to drive the send path against a stand-in
    /// server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_endpoint(
        config: &EmailJsConfig,
        endpoint: impl Into<String>,
    ) -> Result<Self, MailerError> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
        })
    }

    /// Send the order email through `EmailJS`.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure, timeout, or a non-success
    /// API status.
    pub async fn send(&self, email: &OrderEmail) -> Result<SendOutcome, MailerError> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_ref().map(ExposeSecret::expose_secret),
            template_params: email,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(order_id = %email.order_id, "Order email delivered");
        Ok(SendOutcome::Delivered)
    }
}

/// Mailer used when `EmailJS` is unconfigured: logs the payload and
/// reports a simulated success.
#[derive(Debug, Clone, Copy)]
pub struct NullMailer;

impl NullMailer {
    /// Log the payload instead of sending it.
    pub fn send(&self, email: &OrderEmail) -> SendOutcome {
        let payload = serde_json::to_string_pretty(email)
            .unwrap_or_else(|_| format!("{email:?}"));
        tracing::info!(order_id = %email.order_id, "EmailJS not configured; order payload:\n{payload}");
        SendOutcome::Simulated
    }
}
