//! Request extractors
//!
//! - [`SubmissionForm`]: reads the multipart selection form into a
//!   [`RawSubmission`](crate::submission::RawSubmission)

mod submission_form;

pub use submission_form::{SubmissionForm, SubmissionFormError};
