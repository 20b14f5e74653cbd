//! Handlers for status tracking.
//!
//! `/get_status/{id}` returns a complaint with its full status history;
//! `/list_complaints` is the public listing with per-row ETA messages.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use cbox_core::complaint;
use cbox_core::error::CoreError;
use cbox_core::types::Timestamp;
use cbox_db::models::status_log::StatusLogEntry;
use cbox_db::repositories::{ComplaintRepo, StatusLogRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /get_status/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub complaint_id: String,
    pub complaint_text: String,
    pub status: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
    pub submitted_at: Timestamp,
    pub eta_message: String,
    pub escalation_email: String,
    pub logs: Vec<StatusLogEntry>,
}

/// Look up a complaint and its status history by id.
///
/// Ids are matched case-insensitively; the log sequence is returned in
/// chronological order and rendered by clients as-is.
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = complaint::normalize_id(&id);

    let found = ComplaintRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id: id.clone(),
        }))?;

    let logs = StatusLogRepo::list_for_complaint(&state.pool, &found.complaint_id).await?;

    Ok(Json(StatusResponse {
        eta_message: complaint::eta_message(&found.urgency),
        escalation_email: state
            .routing
            .level2_department(&found.category, &found.subcategory),
        complaint_id: found.complaint_id,
        complaint_text: found.user_input,
        status: found.status,
        category: found.category,
        subcategory: found.subcategory,
        urgency: found.urgency,
        assigned_to: found.assigned_to,
        submitted_at: found.created_at,
        logs,
    }))
}

// ---------------------------------------------------------------------------
// GET /list_complaints
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ComplaintListItem {
    pub complaint_id: String,
    pub user_input: String,
    pub submitted_at: Timestamp,
    pub status: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
    pub eta_message: String,
}

/// Public listing of all complaints with per-row ETA messages.
pub async fn list_complaints(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let complaints = ComplaintRepo::list_all(&state.pool).await?;

    let items: Vec<ComplaintListItem> = complaints
        .into_iter()
        .map(|c| ComplaintListItem {
            eta_message: complaint::eta_message(&c.urgency),
            complaint_id: c.complaint_id,
            user_input: c.user_input,
            submitted_at: c.created_at,
            status: c.status,
            category: c.category,
            subcategory: c.subcategory,
            urgency: c.urgency,
            assigned_to: c.assigned_to,
        })
        .collect();

    Ok(Json(items))
}
