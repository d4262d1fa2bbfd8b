//! SMTP backend for sending emails
//!
//! Uses the `lettre` crate to submit messages to an SMTP relay.

use async_trait::async_trait;
use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};

use crate::config::SmtpSettings;
use crate::email::{Email, EmailError, EmailSender};

/// SMTP email backend
///
/// The transport is built once and reused; lettre opens connections lazily
/// and pools them.
///
/// ```rust,no_run
/// use selection_mailer::config::SmtpSettings;
/// use selection_mailer::email::{Email, EmailSender, SmtpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = SmtpBackend::new(&SmtpSettings::default())?;
///
/// let email = Email::new()
///     .to("user@gmail.com")
///     .from("noreply@example.com")
///     .subject("Hello!")
///     .text("Hello, World!");
///
/// backend.send(&email).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SmtpBackend {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpBackend {
    /// Create a new SMTP backend from settings
    ///
    /// Authentication is enabled only when a username is configured.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::SmtpError` if the relay or TLS parameters are invalid
    pub fn new(config: &SmtpSettings) -> Result<Self, EmailError> {
        let mut builder = if config.use_tls {
            let tls_parameters = TlsParameters::new(config.host.clone())
                .map_err(|e| EmailError::smtp(format!("TLS parameters error: {e}")))?;

            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| EmailError::smtp(e.to_string()))?
                .tls(Tls::Required(tls_parameters))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.port(config.port).build(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpBackend {
    fn name(&self) -> &'static str {
        "SMTP"
    }

    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        let message = email.to_message()?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::smtp(e.to_string()))?;

        Ok(())
    }
}
