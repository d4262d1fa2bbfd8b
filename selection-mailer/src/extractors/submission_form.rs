//! Multipart extractor for the selection form
//!
//! The extractor only collects fields; it never judges them. Missing or
//! malformed values are left for [`SubmissionValidator`] so they show up in
//! the field-keyed error map. Only a body that cannot be parsed as multipart
//! at all is rejected here.
//!
//! `recipients` may be sent as repeated fields, or as a single field holding
//! a JSON array of strings.
//!
//! [`SubmissionValidator`]: crate::submission::SubmissionValidator

use axum::{
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::submission::{RawSubmission, Screenshot};

/// The request body could not be read as a multipart form
#[derive(Debug, Error)]
pub enum SubmissionFormError {
    /// Missing boundary, bad encoding, or a truncated body
    #[error("Multipart form parse error - {0}")]
    Multipart(String),
}

impl IntoResponse for SubmissionFormError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": self.to_string() })),
        )
            .into_response()
    }
}

/// Extractor for the selection form
///
/// ```rust,no_run
/// use selection_mailer::extractors::SubmissionForm;
///
/// async fn handler(SubmissionForm(raw): SubmissionForm) -> String {
///     format!("{} recipients", raw.recipients.len())
/// }
/// ```
#[derive(Debug)]
pub struct SubmissionForm(pub RawSubmission);

impl<S> FromRequest<S> for SubmissionForm
where
    S: Send + Sync,
{
    type Rejection = SubmissionFormError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| SubmissionFormError::Multipart(e.body_text()))?;

            let mut raw = RawSubmission::default();
            let mut recipient_values = Vec::new();

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| SubmissionFormError::Multipart(e.body_text()))?
            {
                let Some(name) = field.name().map(ToString::to_string) else {
                    continue;
                };

                match name.as_str() {
                    "screenshot" => raw.screenshot = Some(read_screenshot(field).await?),
                    "recipients" => recipient_values.push(read_text(field).await?),
                    "name" => raw.name = Some(read_text(field).await?),
                    "education" => raw.education = Some(read_text(field).await?),
                    "contact" => raw.contact = Some(read_text(field).await?),
                    "address" => raw.address = Some(read_text(field).await?),
                    "project_idea" => raw.project_idea = Some(read_text(field).await?),
                    other => tracing::trace!(field = other, "Ignoring unknown form field"),
                }
            }

            raw.recipients = expand_recipients(recipient_values);
            Ok(Self(raw))
        }
    }
}

async fn read_text(field: Field<'_>) -> Result<String, SubmissionFormError> {
    field
        .text()
        .await
        .map_err(|e| SubmissionFormError::Multipart(e.body_text()))
}

async fn read_screenshot(field: Field<'_>) -> Result<Screenshot, SubmissionFormError> {
    let filename = field.file_name().map(ToString::to_string);
    let content_type = field.content_type().map(ToString::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| SubmissionFormError::Multipart(e.body_text()))?;

    Ok(Screenshot {
        filename,
        content_type,
        data,
    })
}

/// Flatten recipient values
///
/// A lone value that starts with `[` is read as a JSON array of strings;
/// if it does not parse it is kept verbatim so validation reports it.
fn expand_recipients(values: Vec<String>) -> Vec<String> {
    if let [single] = values.as_slice() {
        if single.trim_start().starts_with('[') {
            if let Ok(list) = serde_json::from_str::<Vec<String>>(single) {
                return list;
            }
        }
    }
    values
}
