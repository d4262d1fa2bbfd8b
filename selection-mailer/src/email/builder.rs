//! Email builder with fluent API
//!
//! Provides a convenient builder pattern for constructing emails, and the
//! MIME assembly shared by every backend.

use bytes::Bytes;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use super::{EmailError, EmailTemplate};

/// An image embedded in the HTML body and referenced as `cid:<content_id>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Content-ID without angle brackets
    pub content_id: String,

    /// MIME type of the image, e.g. `image/png`
    pub content_type: String,

    /// Raw image bytes
    pub data: Bytes,

    /// File name advertised in the part's `Content-Disposition`
    pub filename: Option<String>,
}

impl InlineImage {
    /// Create an inline image, sniffing the MIME type from the bytes
    ///
    /// Falls back to `image/png` when the content is not recognized.
    #[must_use]
    pub fn sniffed(content_id: impl Into<String>, data: Bytes) -> Self {
        let content_type = infer::get(&data)
            .map(|kind| kind.mime_type())
            .filter(|mime| mime.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();

        Self {
            content_id: content_id.into(),
            content_type,
            data,
            filename: None,
        }
    }

    /// Set the file name shown for the inline part
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// File extension matching the image's MIME type
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            _ => "png",
        }
    }
}

/// An email message
///
/// ```rust
/// use selection_mailer::email::Email;
///
/// let email = Email::new()
///     .to("user@gmail.com")
///     .from("noreply@example.com")
///     .subject("Welcome!")
///     .html("<h1>Welcome!</h1>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    /// Email recipients (To)
    pub to: Vec<String>,

    /// Email sender (From)
    pub from: Option<String>,

    /// Email subject
    pub subject: Option<String>,

    /// Plain text body
    pub text: Option<String>,

    /// HTML body
    pub html: Option<String>,

    /// Images referenced from the HTML body by content id
    pub inline_images: Vec<InlineImage>,
}

impl Email {
    /// Create a new empty email
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an email from a template
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    pub fn from_template<T: EmailTemplate>(template: &T) -> Result<Self, EmailError> {
        let (html, text) = template.render_email()?;

        let mut email = Self::new();
        if let Some(html_content) = html {
            email = email.html(&html_content);
        }
        if let Some(text_content) = text {
            email = email.text(&text_content);
        }

        Ok(email)
    }

    /// Add a recipient (To)
    #[must_use]
    pub fn to(mut self, address: &str) -> Self {
        self.to.push(address.to_string());
        self
    }

    /// Add multiple recipients (To)
    #[must_use]
    pub fn to_multiple<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.to
            .extend(addresses.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    /// Set the sender (From)
    #[must_use]
    pub fn from(mut self, address: &str) -> Self {
        self.from = Some(address.to_string());
        self
    }

    /// Set the email subject
    #[must_use]
    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the plain text body
    #[must_use]
    pub fn text(mut self, body: &str) -> Self {
        self.text = Some(body.to_string());
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, body: &str) -> Self {
        self.html = Some(body.to_string());
        self
    }

    /// Embed an image referenced from the HTML body
    #[must_use]
    pub fn inline_image(mut self, image: InlineImage) -> Self {
        self.inline_images.push(image);
        self
    }

    /// Validate the email
    ///
    /// # Errors
    ///
    /// Returns errors if there are no recipients, no sender, no subject or
    /// no content (text or HTML)
    pub fn validate(&self) -> Result<(), EmailError> {
        if self.to.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        if self.from.is_none() {
            return Err(EmailError::NoSender);
        }

        if self.subject.is_none() {
            return Err(EmailError::NoSubject);
        }

        if self.text.is_none() && self.html.is_none() {
            return Err(EmailError::NoContent);
        }

        Ok(())
    }

    /// Assemble the MIME message
    ///
    /// The body is `multipart/alternative` (text and/or HTML). When inline
    /// images are present it is wrapped in `multipart/related` with one
    /// inline part per image.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is incomplete, an address cannot be
    /// parsed, or lettre rejects the message
    pub fn to_message(&self) -> Result<Message, EmailError> {
        self.validate()?;

        let from_addr = self.from.as_ref().ok_or(EmailError::NoSender)?;
        let subject = self.subject.as_ref().ok_or(EmailError::NoSubject)?;

        let mut builder = Message::builder()
            .from(parse_mailbox(from_addr)?)
            .subject(subject);

        for to_addr in &self.to {
            builder = builder.to(parse_mailbox(to_addr)?);
        }

        let alternative = match (&self.text, &self.html) {
            (Some(text), Some(html)) => MultiPart::alternative_plain_html(text.clone(), html.clone()),
            (None, Some(html)) => MultiPart::alternative().singlepart(SinglePart::html(html.clone())),
            (Some(text), None) => MultiPart::alternative().singlepart(SinglePart::plain(text.clone())),
            (None, None) => return Err(EmailError::NoContent),
        };

        let body = if self.inline_images.is_empty() {
            alternative
        } else {
            let mut related = MultiPart::related().multipart(alternative);
            for image in &self.inline_images {
                let content_type = ContentType::parse(&image.content_type).map_err(|e| {
                    EmailError::message(format!("invalid content type {}: {e}", image.content_type))
                })?;
                let attachment = match &image.filename {
                    Some(name) => Attachment::new_inline_with_name(image.content_id.clone(), name.clone()),
                    None => Attachment::new_inline(image.content_id.clone()),
                };
                related = related.singlepart(attachment.body(image.data.to_vec(), content_type));
            }
            related
        };

        builder
            .multipart(body)
            .map_err(|e| EmailError::message(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))
}
