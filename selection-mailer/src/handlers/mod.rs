//! HTTP handlers and routing
//!
//! - `POST /send-selection-email/` - validate and deliver a submission
//! - `GET /health` - liveness check

mod selection;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::health::liveness;
use crate::state::AppState;

pub use selection::send_selection_email;

/// Path of the submission endpoint
pub const SEND_SELECTION_EMAIL_PATH: &str = "/send-selection-email/";

/// Path of the liveness check
pub const HEALTH_PATH: &str = "/health";

/// Build the application router
///
/// The body limit comes from `server.max_body_bytes`; every request is
/// traced.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config().server.max_body_bytes;

    Router::new()
        .route(SEND_SELECTION_EMAIL_PATH, post(send_selection_email))
        .route(HEALTH_PATH, get(liveness))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
