//! Submission types and validation
//!
//! A [`RawSubmission`] is what the multipart extractor produced; every field
//! may be missing. [`SubmissionValidator::validate`] turns it into a
//! [`Submission`] or a field-keyed [`ValidationErrors`] map. All fields are
//! checked in one pass so the client sees every problem at once.

pub mod image;
pub mod recipients;

use std::borrow::Cow;

use bytes::Bytes;
use validator::{ValidateEmail, ValidateLength, ValidationError, ValidationErrors};

use crate::config::MailSettings;
pub use self::image::{verify_screenshot, ScreenshotError, MAX_SCREENSHOT_BYTES};
pub use self::recipients::RecipientPolicy;

/// Maximum length of the `name` field, in characters
pub const NAME_MAX_CHARS: u64 = 255;

/// Maximum length of the `contact` field, in characters
pub const CONTACT_MAX_CHARS: u64 = 50;

/// The uploaded screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// File name supplied by the client, if any
    pub filename: Option<String>,

    /// Content type supplied by the client, if any (not trusted)
    pub content_type: Option<String>,

    /// File contents
    pub data: Bytes,
}

impl Screenshot {
    /// Create a screenshot from bytes with no client metadata
    #[must_use]
    pub const fn from_bytes(data: Bytes) -> Self {
        Self {
            filename: None,
            content_type: None,
            data,
        }
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Form fields as received, before validation
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    /// Applicant name
    pub name: Option<String>,
    /// Education summary
    pub education: Option<String>,
    /// Contact number or handle
    pub contact: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Project idea description
    pub project_idea: Option<String>,
    /// Uploaded screenshot
    pub screenshot: Option<Screenshot>,
    /// Recipient addresses in submission order
    pub recipients: Vec<String>,
}

/// A validated submission
///
/// Only [`SubmissionValidator::validate`] can build one, so holding a
/// `Submission` means every field passed its checks.
#[derive(Debug, Clone)]
pub struct Submission {
    name: String,
    education: String,
    contact: String,
    address: String,
    project_idea: String,
    screenshot: Screenshot,
    recipients: Vec<String>,
}

impl Submission {
    /// Applicant name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Education summary
    #[must_use]
    pub fn education(&self) -> &str {
        &self.education
    }

    /// Contact number or handle
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Postal address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Project idea description
    #[must_use]
    pub fn project_idea(&self) -> &str {
        &self.project_idea
    }

    /// The verified screenshot
    #[must_use]
    pub const fn screenshot(&self) -> &Screenshot {
        &self.screenshot
    }

    /// Recipients, non-empty and all allowed
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }
}

/// Validates raw submissions against the recipient policy
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    policy: RecipientPolicy,
}

impl SubmissionValidator {
    /// Create a validator with the given recipient policy
    #[must_use]
    pub const fn new(policy: RecipientPolicy) -> Self {
        Self { policy }
    }

    /// Create a validator from the `[mail]` settings
    #[must_use]
    pub fn from_settings(settings: &MailSettings) -> Self {
        Self::new(RecipientPolicy::from_settings(settings))
    }

    /// The recipient policy in use
    #[must_use]
    pub const fn policy(&self) -> &RecipientPolicy {
        &self.policy
    }

    /// Validate every field of a raw submission
    ///
    /// # Errors
    ///
    /// Returns all field errors, keyed by field name, if any check fails
    pub fn validate(&self, raw: RawSubmission) -> Result<Submission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", raw.name, Some(NAME_MAX_CHARS));
        let education = required_text(&mut errors, "education", raw.education, None);
        let contact = required_text(&mut errors, "contact", raw.contact, Some(CONTACT_MAX_CHARS));
        let address = required_text(&mut errors, "address", raw.address, None);
        let project_idea = required_text(&mut errors, "project_idea", raw.project_idea, None);
        let screenshot = check_screenshot(&mut errors, raw.screenshot);
        let recipients = self.check_recipients(&mut errors, raw.recipients);

        let (
            Some(name),
            Some(education),
            Some(contact),
            Some(address),
            Some(project_idea),
            Some(screenshot),
            Some(recipients),
        ) = (name, education, contact, address, project_idea, screenshot, recipients)
        else {
            return Err(errors);
        };

        Ok(Submission {
            name,
            education,
            contact,
            address,
            project_idea,
            screenshot,
            recipients,
        })
    }

    fn check_recipients(
        &self,
        errors: &mut ValidationErrors,
        recipients: Vec<String>,
    ) -> Option<Vec<String>> {
        let recipients: Vec<String> = recipients
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        if recipients.is_empty() {
            errors.add(
                "recipients",
                field_error("required", "At least one recipient is required."),
            );
            return None;
        }

        let malformed: Vec<&str> = recipients
            .iter()
            .filter(|r| !r.validate_email())
            .map(String::as_str)
            .collect();
        if !malformed.is_empty() {
            errors.add(
                "recipients",
                field_error(
                    "email",
                    format!("Enter a valid email address: {}", malformed.join(", ")),
                ),
            );
        }

        let well_formed: Vec<String> = recipients
            .iter()
            .filter(|r| r.validate_email())
            .cloned()
            .collect();
        let disallowed = self.policy.disallowed(&well_formed);
        if !disallowed.is_empty() {
            errors.add(
                "recipients",
                field_error(
                    "not_allowed",
                    format!(
                        "Only {} are allowed. Invalid emails: {}",
                        self.policy.describe(),
                        disallowed.join(", ")
                    ),
                ),
            );
        }

        (malformed.is_empty() && disallowed.is_empty()).then_some(recipients)
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    max_chars: Option<u64>,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, field_error("required", "This field is required."));
        return None;
    };

    let value = value.trim().to_string();
    if value.is_empty() {
        errors.add(field, field_error("blank", "This field may not be blank."));
        return None;
    }

    if let Some(max) = max_chars {
        if !value.validate_length(None, Some(max), None) {
            errors.add(
                field,
                field_error(
                    "max_length",
                    format!("Ensure this field has no more than {max} characters."),
                ),
            );
            return None;
        }
    }

    Some(value)
}

fn check_screenshot(
    errors: &mut ValidationErrors,
    screenshot: Option<Screenshot>,
) -> Option<Screenshot> {
    let Some(screenshot) = screenshot else {
        errors.add("screenshot", field_error("required", "No file was submitted."));
        return None;
    };

    match verify_screenshot(&screenshot.data) {
        Ok(_) => Some(screenshot),
        Err(err) => {
            errors.add("screenshot", field_error("invalid_image", err.to_string()));
            None
        }
    }
}
