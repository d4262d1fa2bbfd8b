//! Email construction and delivery backends
//!
//! This module provides:
//! - An [`Email`] builder with inline image support and MIME assembly
//! - The [`EmailSender`] trait implemented by every transport
//! - SMTP and AWS SES backends
//! - The Askama-backed [`SelectionEmail`] template
//!
//! # Examples
//!
//! ```rust,no_run
//! use selection_mailer::config::SmtpSettings;
//! use selection_mailer::email::{Email, EmailSender, SelectionEmail, SmtpBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SmtpBackend::new(&SmtpSettings::default())?;
//!
//! let template = SelectionEmail {
//!     name: "Ada".to_string(),
//!     education: "BSc".to_string(),
//!     contact: "555-0100".to_string(),
//!     address: "London".to_string(),
//!     project_idea: "Engines".to_string(),
//! };
//!
//! let email = Email::from_template(&template)?
//!     .to("hiring@gmail.com")
//!     .from("noreply@example.com")
//!     .subject(&template.subject());
//!
//! backend.send(&email).await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod builder;
mod error;
mod sender;
mod template;

pub use backend::{aws_ses::AwsSesBackend, smtp::SmtpBackend};
pub use builder::{Email, InlineImage};
pub use error::EmailError;
pub use sender::EmailSender;
pub use template::{EmailTemplate, SelectionEmail, SCREENSHOT_CONTENT_ID, SCREENSHOT_FILE_STEM};

#[cfg(test)]
pub use sender::MockEmailSender;
