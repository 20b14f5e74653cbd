//! Route definitions for the key-gated admin surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes.
///
/// ```text
/// POST /verify_key         -> admin::verify_key
/// GET  /all_complaints     -> admin::all_complaints
/// POST /update_complaint   -> admin::update_complaint (modify key)
/// POST /delete_complaint   -> admin::delete_complaint (modify key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verify_key", post(admin::verify_key))
        .route("/all_complaints", get(admin::all_complaints))
        .route("/update_complaint", post(admin::update_complaint))
        .route("/delete_complaint", post(admin::delete_complaint))
}
