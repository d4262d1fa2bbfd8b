//! Liveness check
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use selection_mailer::health::liveness;
//!
//! let app: Router = Router::new().route("/health", get(liveness));
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of the liveness response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// Always `"ok"` while the process can serve requests
    pub status: String,
    /// Crate version
    pub version: String,
}

impl Default for LivenessResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl IntoResponse for LivenessResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Liveness handler; does not touch any transport
pub async fn liveness() -> LivenessResponse {
    LivenessResponse::default()
}
