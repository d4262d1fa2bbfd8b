//! Error types and error handling
//!
//! Every failure the HTTP surface can report becomes an [`AppError`], which
//! renders the `{"status": "error", "message": ...}` envelope.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::extractors::SubmissionFormError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more fields failed validation (400)
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// The request body could not be read as a submission form (400)
    #[error(transparent)]
    Multipart(#[from] SubmissionFormError),

    /// No transport accepted the message (500)
    #[error("{0}")]
    Delivery(String),
}

impl AppError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `message` key in the response envelope
    #[must_use]
    pub fn message(&self) -> Value {
        match self {
            Self::Validation(errors) => validation_errors_json(errors),
            Self::Multipart(e) => Value::String(e.to_string()),
            Self::Delivery(msg) => Value::String(msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = json!({
            "status": "error",
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

/// Render validation errors as `{field: [message, ...]}`
///
/// Fields are sorted by name. Errors without a message fall back to their code.
#[must_use]
pub fn validation_errors_json(errors: &ValidationErrors) -> Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    json!(fields)
}
