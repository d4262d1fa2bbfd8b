//! Configuration management for selection-mailer
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SELECTION_MAILER_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/selection-mailer/config.toml` (user config, XDG)
//! 4. `/etc/selection-mailer/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `SELECTION_MAILER_SECTION__FIELD_NAME`
//! - Example: `SELECTION_MAILER_SMTP__HOST=smtp.gmail.com`
//! - Example: `SELECTION_MAILER_SES__REGION=eu-west-1`
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [mail]
//! from_address = "noreply@example.com"
//! allowed_domains = ["gmail.com", "hotmail.com", "yahoo.com"]
//! allowed_special_emails = ["careers@accelx.net"]
//!
//! [smtp]
//! host = "smtp.gmail.com"
//! port = 587
//! username = "mailer@gmail.com"
//! password = "app-password"
//!
//! [ses]
//! region = "us-east-1"
//! access_key_id = "AKIA..."
//! secret_access_key = "..."
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Name used for XDG and system config directories
pub const SERVICE_NAME: &str = "selection-mailer";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum accepted request body in bytes
    ///
    /// Must stay above the 5 MiB screenshot limit so oversized images reach
    /// validation instead of being cut off by the body limit.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerSettings {
    /// Socket address string for `TcpListener::bind`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed socket address, if `host` is an IP literal
    #[must_use]
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.bind_address().parse().ok()
    }
}

/// Sender identity and recipient allow-lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Default From address for outgoing mail
    pub from_address: String,

    /// Recipient domains accepted (compared case-insensitively)
    pub allowed_domains: Vec<String>,

    /// Individual addresses accepted regardless of domain (exact match)
    pub allowed_special_emails: Vec<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from_address: "noreply@example.com".to_string(),
            allowed_domains: vec![
                "gmail.com".to_string(),
                "hotmail.com".to_string(),
                "yahoo.com".to_string(),
            ],
            allowed_special_emails: vec!["careers@accelx.net".to_string()],
        }
    }
}

/// SMTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port (usually 587 for STARTTLS)
    pub port: u16,

    /// SMTP username; empty disables authentication
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Require STARTTLS
    pub use_tls: bool,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            use_tls: true,
        }
    }
}

/// AWS SES fallback configuration
///
/// The fallback transport is only registered when [`SesSettings::credentials`]
/// returns `Some`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SesSettings {
    /// AWS region, e.g. `us-east-1`
    pub region: Option<String>,

    /// AWS access key id
    pub access_key_id: Option<String>,

    /// AWS secret access key
    pub secret_access_key: Option<String>,
}

/// Complete SES credentials, present only when every field is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SesCredentials {
    /// AWS region
    pub region: String,
    /// AWS access key id
    pub access_key_id: String,
    /// AWS secret access key
    pub secret_access_key: String,
}

impl SesSettings {
    /// Returns the credentials if region, key id and secret are all non-empty
    #[must_use]
    pub fn credentials(&self) -> Option<SesCredentials> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        Some(SesCredentials {
            region: non_empty(&self.region)?,
            access_key_id: non_empty(&self.access_key_id)?,
            secret_access_key: non_empty(&self.secret_access_key)?,
        })
    }
}

/// Complete selection-mailer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Sender and allow-list settings
    #[serde(default)]
    pub mail: MailSettings,

    /// SMTP transport settings
    #[serde(default)]
    pub smtp: SmtpSettings,

    /// Optional SES fallback settings
    #[serde(default)]
    pub ses: SesSettings,
}

impl AppConfig {
    /// Load configuration for a specific service
    ///
    /// Searches for configuration in XDG-compliant locations with precedence:
    /// 1. Environment variables (`SELECTION_MAILER_*`)
    /// 2. `./config.toml`
    /// 3. `~/.config/selection-mailer/config.toml`
    /// 4. `/etc/selection-mailer/config.toml`
    /// 5. Defaults
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let system_config = PathBuf::from("/etc").join(service_name).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Self::env_provider());

        Ok(figment.extract()?)
    }

    /// Load configuration from a specific file, with environment overrides
    pub fn load_from(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.into()))
            .merge(Self::env_provider())
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path for a service
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join(service_name).join("config.toml"),
        )
    }

    fn env_provider() -> Env {
        Env::prefixed("SELECTION_MAILER_").split("__").lowercase(true)
    }
}
