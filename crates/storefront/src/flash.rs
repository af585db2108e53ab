//! One-shot toast messages stored in the session.
//!
//! The storefront surfaces transient notifications ("Added to cart",
//! validation failures) as a single flash message set by the handler
//! that performed the action and taken (read-and-clear) by the next
//! page render.

use tower_sessions::Session;

/// Session key for the pending flash message.
const FLASH_KEY: &str = "flash";

/// Queue a toast message for the next page render.
///
/// A session write failure only loses the notification, never the
/// action it describes, so it is logged and swallowed.
pub async fn set(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message.to_string()).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Take the pending toast message, clearing it from the session.
pub async fn take(session: &Session) -> Option<String> {
    match session.remove::<String>(FLASH_KEY).await {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to read flash message: {e}");
            None
        }
    }
}
