//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the storefront runs out of the box
//! with the order mailer in simulation mode.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: derived from host/port)
//! - `UPI_ID` - UPI id shown on the payment page
//! - `EMAILJS_SERVICE_ID` - `EmailJS` service id
//! - `EMAILJS_TEMPLATE_ID` - `EmailJS` template id
//! - `EMAILJS_PUBLIC_KEY` - `EmailJS` public key
//! - `EMAILJS_PRIVATE_KEY` - `EmailJS` private key (optional, server-side)
//!
//! The mailer is considered configured only when service id, template
//! id, and public key are all present and none looks like a
//! placeholder; otherwise orders are simulated.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive).
///
/// A key such as `YOUR_PUBLIC_KEY` means the deployment was never
/// wired to a real account; treating it as configured would send
/// requests that can only fail.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_",
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// UPI id shown on the payment page for manual transfers
    pub upi_id: String,
    /// `EmailJS` order-mailer configuration, when fully provided
    pub emailjs: Option<EmailJsConfig>,
}

/// `EmailJS` REST API configuration.
///
/// Implements `Debug` manually to redact the private key.
#[derive(Clone)]
pub struct EmailJsConfig {
    /// `EmailJS` service id
    pub service_id: String,
    /// `EmailJS` template id
    pub template_id: String,
    /// Public key (account user id, safe to expose)
    pub public_key: String,
    /// Private key for server-side sends
    pub private_key: Option<SecretString>,
}

impl std::fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if host or port fail to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_optional_env("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"));
        let upi_id = get_env_or_default("UPI_ID", "cosmoglow@upi");
        let emailjs = EmailJsConfig::from_env();

        Ok(Self {
            host,
            port,
            base_url,
            upi_id,
            emailjs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailJsConfig {
    /// Read the `EmailJS` variables, returning `None` unless the
    /// service id, template id, and public key are all present and
    /// none is a placeholder.
    fn from_env() -> Option<Self> {
        let service_id = get_optional_env("EMAILJS_SERVICE_ID")?;
        let template_id = get_optional_env("EMAILJS_TEMPLATE_ID")?;
        let public_key = get_optional_env("EMAILJS_PUBLIC_KEY")?;

        for (name, value) in [
            ("EMAILJS_SERVICE_ID", &service_id),
            ("EMAILJS_TEMPLATE_ID", &template_id),
            ("EMAILJS_PUBLIC_KEY", &public_key),
        ] {
            if is_placeholder(value) {
                tracing::warn!("{name} looks like a placeholder; order mailer disabled");
                return None;
            }
        }

        let private_key = get_optional_env("EMAILJS_PRIVATE_KEY").map(SecretString::from);

        Some(Self {
            service_id,
            template_id,
            public_key,
            private_key,
        })
    }
}

/// Whether a credential value matches the placeholder blocklist.
fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_placeholder_detects_templates() {
        assert!(is_placeholder("YOUR_PUBLIC_KEY"));
        assert!(is_placeholder("your-service-id"));
        assert!(is_placeholder("changeme"));
        assert!(is_placeholder("Example123"));
    }

    #[test]
    fn test_is_placeholder_accepts_real_keys() {
        assert!(!is_placeholder("service_k3x9q7"));
        assert!(!is_placeholder("mB4tQ9wZc1"));
    }
}
