pub mod admin;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /predict                 classify text, propose routing + ETA (POST)
/// /submit                  create a complaint (POST)
/// /get_status/{id}         complaint detail + status history (GET)
/// /list_complaints         public listing with ETA per row (GET)
///
/// /verify_key              map an access key to its permission level (POST)
/// /all_complaints          admin table source (GET)
/// /update_complaint        partial update, modify key required (POST)
/// /delete_complaint        delete, modify key required (POST)
/// ```
///
/// The paths are the public wire contract consumed by the page
/// controllers, so they are mounted at the root rather than under a
/// versioned prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(user::router()).merge(admin::router())
}
