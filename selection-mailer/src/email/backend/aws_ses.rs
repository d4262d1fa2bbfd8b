//! AWS SES backend for sending emails
//!
//! Uses the SES v2 `SendEmail` API with raw MIME content, so the message
//! carries the same `multipart/related` structure and inline screenshot as
//! the SMTP path. Requires the `aws-ses` feature.

#[cfg(feature = "aws-ses")]
use async_trait::async_trait;
#[cfg(feature = "aws-ses")]
use aws_sdk_sesv2::{
    config::{Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::send_email::SendEmailError,
    primitives::Blob,
    types::{Destination, EmailContent, RawMessage},
    Client,
};

use crate::config::SesCredentials;
use crate::email::{Email, EmailError, EmailSender};

/// AWS SES email backend
///
/// Only constructed when SES credentials are configured; without them the
/// fallback transport is simply not registered.
#[cfg(feature = "aws-ses")]
pub struct AwsSesBackend {
    client: Client,
}

#[cfg(feature = "aws-ses")]
impl AwsSesBackend {
    /// Create a new AWS SES backend with the given client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a backend from static credentials and a region
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible to match the disabled-feature stub
    pub async fn from_credentials(credentials: &SesCredentials) -> Result<Self, EmailError> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                "selection-mailer",
            ))
            .load()
            .await;

        Ok(Self::new(Client::new(&config)))
    }

    /// Serialize the email as raw MIME content
    fn build_content(email: &Email) -> Result<EmailContent, EmailError> {
        let raw = email.to_message()?.formatted();

        let raw_message = RawMessage::builder()
            .data(Blob::new(raw))
            .build()
            .map_err(|e| EmailError::aws_ses(format!("Failed to build raw message: {e}")))?;

        Ok(EmailContent::builder().raw(raw_message).build())
    }
}

/// Separate errors reported by SES itself from transport-level failures
#[cfg(feature = "aws-ses")]
fn classify_error<R: std::fmt::Debug>(err: SdkError<SendEmailError, R>) -> EmailError {
    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            EmailError::provider(
                inner
                    .message()
                    .map_or_else(|| inner.to_string(), ToString::to_string),
            )
        }
        _ => EmailError::aws_ses(format!(
            "Failed to send email: {}",
            DisplayErrorContext(&err)
        )),
    }
}

#[cfg(feature = "aws-ses")]
#[async_trait]
impl EmailSender for AwsSesBackend {
    fn name(&self) -> &'static str {
        "SES"
    }

    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        let from_addr = email.from.as_ref().ok_or(EmailError::NoSender)?;
        let content = Self::build_content(email)?;

        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();

        self.client
            .send_email()
            .from_email_address(from_addr)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(classify_error)?;

        Ok(())
    }
}

/// Stub implementation when the `aws-ses` feature is not enabled
#[cfg(not(feature = "aws-ses"))]
pub struct AwsSesBackend;

#[cfg(not(feature = "aws-ses"))]
impl AwsSesBackend {
    /// AWS SES backend is not available without the `aws-ses` feature
    ///
    /// # Errors
    ///
    /// Always returns an error indicating the feature is not enabled
    #[allow(clippy::unused_async)]
    pub async fn from_credentials(_credentials: &SesCredentials) -> Result<Self, EmailError> {
        Err(EmailError::config(
            "AWS SES backend requires the 'aws-ses' feature to be enabled",
        ))
    }
}

#[cfg(not(feature = "aws-ses"))]
#[async_trait::async_trait]
impl EmailSender for AwsSesBackend {
    fn name(&self) -> &'static str {
        "SES"
    }

    async fn send(&self, _email: &Email) -> Result<(), EmailError> {
        Err(EmailError::config(
            "AWS SES backend requires the 'aws-ses' feature to be enabled",
        ))
    }
}
