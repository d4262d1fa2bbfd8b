//! Email backend implementations
//!
//! - **SMTP**: direct submission to a mail server (primary transport)
//! - **AWS SES**: raw MIME upload through the SES v2 API (fallback transport)

pub mod aws_ses;
pub mod smtp;
