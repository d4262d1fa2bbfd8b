//! Selection email handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::{SubmissionForm, SubmissionFormError};
use crate::state::AppState;

/// Body of a successful delivery
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    status: &'static str,
    message: String,
}

impl SuccessResponse {
    fn sent(recipient_count: usize) -> Self {
        Self {
            status: "success",
            message: format!("Email sent to {recipient_count} recipients"),
        }
    }
}

/// Validate a submission and deliver it through the transport chain
///
/// Responds 200 once any transport accepts the message, 400 for malformed
/// or invalid input, and 500 when every transport failed.
pub async fn send_selection_email(
    State(state): State<AppState>,
    form: Result<SubmissionForm, SubmissionFormError>,
) -> Result<Json<SuccessResponse>, AppError> {
    let SubmissionForm(raw) = form?;
    let submission = state.validator().validate(raw)?;

    tracing::debug!(
        name = submission.name(),
        recipients = submission.recipients().len(),
        screenshot_bytes = submission.screenshot().size(),
        "Submission accepted"
    );

    let outcome = state.dispatcher().dispatch(&submission).await;
    if !outcome.sent {
        return Err(AppError::Delivery(outcome.message));
    }

    Ok(Json(SuccessResponse::sent(outcome.recipient_count)))
}
