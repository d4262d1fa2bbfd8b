//! Email templates
//!
//! The selection email is rendered from two Askama templates: an HTML body
//! that references the screenshot as `cid:github_screenshot`, and a plain
//! text alternative.

use askama::Template;

use super::EmailError;

/// Trait for email templates
///
/// Returns a tuple of `(html, text)` where either can be `None`.
pub trait EmailTemplate {
    /// Render the email template
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError>;
}

/// Content id of the inline screenshot referenced by the HTML body
pub const SCREENSHOT_CONTENT_ID: &str = "github_screenshot";

/// File name stem of the inline screenshot part
pub const SCREENSHOT_FILE_STEM: &str = "github_profile_screenshot";

/// HTML body of the selection email
#[derive(Debug, Clone, Template)]
#[template(path = "email_body.html")]
pub struct SelectionEmail {
    /// Applicant name
    pub name: String,
    /// Education summary
    pub education: String,
    /// Contact number or handle
    pub contact: String,
    /// Postal address
    pub address: String,
    /// Project idea description
    pub project_idea: String,
}

#[derive(Template)]
#[template(path = "email_body.txt")]
struct SelectionEmailText<'a> {
    email: &'a SelectionEmail,
}

impl SelectionEmail {
    /// Subject line for this applicant
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Python Backend Engineer Selection Task - {}", self.name)
    }

    /// Content id the HTML body uses for the screenshot
    #[must_use]
    pub const fn screenshot_cid(&self) -> &'static str {
        SCREENSHOT_CONTENT_ID
    }
}

impl EmailTemplate for SelectionEmail {
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError> {
        let html = self.render()?;
        let text = SelectionEmailText { email: self }.render()?;
        Ok((Some(html), Some(text)))
    }
}
