//! Delivery of validated submissions
//!
//! The [`Dispatcher`] renders a [`Submission`] into a selection email and
//! tries each registered transport in order until one accepts it.

use std::sync::Arc;

use crate::email::{Email, EmailError, EmailSender, InlineImage, SelectionEmail, SCREENSHOT_CONTENT_ID, SCREENSHOT_FILE_STEM};
use crate::submission::Submission;

/// Message returned when every transport failed
pub const ALL_PROVIDERS_FAILED: &str = "Failed to send email through all providers";

/// Result of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Whether any transport accepted the message
    pub sent: bool,
    /// Human-readable result
    pub message: String,
    /// Number of recipients reached; zero when nothing was sent
    pub recipient_count: usize,
}

impl DeliveryOutcome {
    fn delivered(transport: &str, recipient_count: usize) -> Self {
        Self {
            sent: true,
            message: format!("Email sent successfully via {transport}"),
            recipient_count,
        }
    }

    fn failed() -> Self {
        Self {
            sent: false,
            message: ALL_PROVIDERS_FAILED.to_string(),
            recipient_count: 0,
        }
    }
}

/// Ordered chain of email transports
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use selection_mailer::config::SmtpSettings;
/// use selection_mailer::dispatch::Dispatcher;
/// use selection_mailer::email::SmtpBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::new("noreply@example.com")
///     .with_transport(Arc::new(SmtpBackend::new(&SmtpSettings::default())?));
/// assert_eq!(dispatcher.transport_names(), vec!["SMTP"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    from_address: String,
    transports: Vec<Arc<dyn EmailSender>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("from_address", &self.from_address)
            .field("transports", &self.transport_names())
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with no transports
    #[must_use]
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            transports: Vec::new(),
        }
    }

    /// Append a transport; earlier transports are tried first
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn EmailSender>) -> Self {
        self.push(transport);
        self
    }

    /// Append a transport in place
    pub fn push(&mut self, transport: Arc<dyn EmailSender>) {
        self.transports.push(transport);
    }

    /// Names of the registered transports, in order
    #[must_use]
    pub fn transport_names(&self) -> Vec<&'static str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    /// The From address used on outgoing mail
    #[must_use]
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Build the selection email for a submission
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if rendering fails
    pub fn compose(&self, submission: &Submission) -> Result<Email, EmailError> {
        let template = SelectionEmail {
            name: submission.name().to_string(),
            education: submission.education().to_string(),
            contact: submission.contact().to_string(),
            address: submission.address().to_string(),
            project_idea: submission.project_idea().to_string(),
        };

        let screenshot = InlineImage::sniffed(SCREENSHOT_CONTENT_ID, submission.screenshot().data.clone());
        let filename = format!("{SCREENSHOT_FILE_STEM}.{}", screenshot.extension());

        Ok(Email::from_template(&template)?
            .from(&self.from_address)
            .subject(&template.subject())
            .to_multiple(submission.recipients())
            .inline_image(screenshot.with_filename(filename)))
    }

    /// Render and deliver a submission
    ///
    /// Transports are tried in order; the first success stops the chain.
    /// Failures are logged and never returned to the caller.
    pub async fn dispatch(&self, submission: &Submission) -> DeliveryOutcome {
        let recipient_count = submission.recipients().len();

        let email = match self.compose(submission) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(error = %e, "Failed to compose selection email");
                return DeliveryOutcome::failed();
            }
        };

        for transport in &self.transports {
            match transport.send(&email).await {
                Ok(()) => {
                    tracing::info!(
                        transport = transport.name(),
                        recipients = recipient_count,
                        "Selection email delivered"
                    );
                    return DeliveryOutcome::delivered(transport.name(), recipient_count);
                }
                Err(e) => {
                    tracing::error!(
                        transport = transport.name(),
                        error = %e,
                        "Email transport failed"
                    );
                }
            }
        }

        tracing::error!(recipients = recipient_count, "{ALL_PROVIDERS_FAILED}");
        DeliveryOutcome::failed()
    }
}
