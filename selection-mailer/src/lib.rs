//! selection-mailer: validate a selection-task submission and email it
//!
//! A single endpoint accepts a multipart form with applicant details, a
//! screenshot and a list of recipients. The submission is validated against
//! configured allow-lists, rendered into an HTML email with the screenshot
//! inline, and delivered through an ordered chain of transports: SMTP first,
//! AWS SES as a fallback when credentials are configured.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use selection_mailer::{config::AppConfig, handlers, observability, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     observability::init()?;
//!
//!     let config = AppConfig::load_for_service("selection-mailer")?;
//!     let addr = config.server.bind_address();
//!     let state = AppState::from_config(config).await?;
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, handlers::router(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `aws-ses` - AWS SES fallback transport (default)

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod dispatch;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod health;
pub mod observability;
pub mod state;
pub mod submission;

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::{AppConfig, MailSettings, ServerSettings, SesSettings, SmtpSettings};
    pub use crate::dispatch::{DeliveryOutcome, Dispatcher};
    pub use crate::email::{
        AwsSesBackend, Email, EmailError, EmailSender, EmailTemplate, InlineImage,
        SelectionEmail, SmtpBackend,
    };
    pub use crate::error::AppError;
    pub use crate::extractors::{SubmissionForm, SubmissionFormError};
    pub use crate::state::AppState;
    pub use crate::submission::{RawSubmission, Screenshot, Submission, SubmissionValidator};
}
