//! External service clients.

pub mod mailer;
