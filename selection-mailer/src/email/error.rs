//! Email error types

use thiserror::Error;

/// Errors that can occur when building or sending an email
#[derive(Debug, Error)]
pub enum EmailError {
    /// Email has no recipients
    #[error("email must have at least one recipient")]
    NoRecipients,

    /// Email has no sender
    #[error("email must have a from address")]
    NoSender,

    /// Email has no subject
    #[error("email must have a subject")]
    NoSubject,

    /// Email has no body content
    #[error("email must have either text or HTML content")]
    NoContent,

    /// Invalid email address format
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error
    #[error("failed to render email template: {0}")]
    TemplateError(#[from] askama::Error),

    /// MIME message could not be assembled
    #[error("failed to build message: {0}")]
    MessageError(String),

    /// SMTP transport error
    #[error("SMTP error: {0}")]
    SmtpError(String),

    /// AWS SES request failed before the service answered
    #[error("AWS SES error: {0}")]
    AwsSesError(String),

    /// AWS SES rejected the request
    #[error("SES email sending failed: {0}")]
    ProviderError(String),

    /// Email configuration error
    #[error("email configuration error: {0}")]
    ConfigError(String),
}

impl EmailError {
    /// Create an SMTP error from a string message
    #[must_use]
    pub fn smtp<T: Into<String>>(msg: T) -> Self {
        Self::SmtpError(msg.into())
    }

    /// Create an AWS SES error from a string message
    #[must_use]
    pub fn aws_ses<T: Into<String>>(msg: T) -> Self {
        Self::AwsSesError(msg.into())
    }

    /// Create a provider-reported error from the provider's message
    #[must_use]
    pub fn provider<T: Into<String>>(msg: T) -> Self {
        Self::ProviderError(msg.into())
    }

    /// Create a message assembly error
    #[must_use]
    pub fn message<T: Into<String>>(msg: T) -> Self {
        Self::MessageError(msg.into())
    }

    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::ConfigError(msg.into())
    }
}
