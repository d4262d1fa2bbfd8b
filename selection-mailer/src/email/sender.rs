//! Email sender trait abstraction
//!
//! This module defines the core `EmailSender` trait that every transport implements.

use async_trait::async_trait;

use super::{Email, EmailError};

/// A mail transport
///
/// Implemented by the SMTP and AWS SES backends. The dispatcher holds an
/// ordered list of senders and tries them in turn.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Short transport name used in delivery messages and logs (`"SMTP"`, `"SES"`)
    fn name(&self) -> &'static str;

    /// Send an email to all of its recipients
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the email cannot be sent or is invalid
    async fn send(&self, email: &Email) -> Result<(), EmailError>;
}
