//! Route definitions for the public submission and tracking surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{submission, tracking};
use crate::state::AppState;

/// Public routes.
///
/// ```text
/// POST /predict            -> submission::predict
/// POST /submit             -> submission::submit
/// GET  /get_status/{id}    -> tracking::get_status
/// GET  /list_complaints    -> tracking::list_complaints
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(submission::predict))
        .route("/submit", post(submission::submit))
        .route("/get_status/{id}", get(tracking::get_status))
        .route("/list_complaints", get(tracking::list_complaints))
}
