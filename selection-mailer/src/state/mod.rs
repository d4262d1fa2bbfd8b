//! Application state
//!
//! Holds the configuration together with the validator and dispatcher built
//! from it. Everything is immutable after construction and shared via `Arc`.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::email::{AwsSesBackend, SmtpBackend};
use crate::submission::SubmissionValidator;

/// Shared state for the axum router
///
/// # Example
///
/// ```rust,no_run
/// use selection_mailer::{config::AppConfig, state::AppState};
///
/// # async fn example() -> anyhow::Result<()> {
/// let state = AppState::from_config(AppConfig::default()).await?;
/// let app: axum::Router = axum::Router::new()
///     .route("/", axum::routing::get(|| async { "Hello!" }))
///     .with_state(state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<AppConfig>,
    validator: Arc<SubmissionValidator>,
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Assemble state from prebuilt parts
    #[must_use]
    pub fn new(config: AppConfig, validator: SubmissionValidator, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            validator: Arc::new(validator),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build state and transports from configuration
    ///
    /// SMTP is always registered. SES follows it when all three SES
    /// credentials are set; otherwise the fallback is skipped.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let validator = SubmissionValidator::from_settings(&config.mail);

        let mut dispatcher = Dispatcher::new(config.mail.from_address.clone());
        dispatcher.push(Arc::new(SmtpBackend::new(&config.smtp)?));

        if let Some(credentials) = config.ses.credentials() {
            dispatcher.push(Arc::new(AwsSesBackend::from_credentials(&credentials).await?));
        }

        tracing::info!(
            transports = ?dispatcher.transport_names(),
            from = %config.mail.from_address,
            "Email transports registered"
        );

        Ok(Self::new(config, validator, dispatcher))
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Submission validator
    #[must_use]
    pub fn validator(&self) -> &SubmissionValidator {
        &self.validator
    }

    /// Transport chain
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
