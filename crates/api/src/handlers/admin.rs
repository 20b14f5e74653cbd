//! Handlers for the key-gated admin surface.
//!
//! Verification maps a key to its permission level; every mutation
//! re-checks the modify key from the request body before touching
//! anything else. Client-side control gating is presentation only --
//! these checks are the enforcement point.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use cbox_core::complaint;
use cbox_core::error::CoreError;
use cbox_core::types::Timestamp;
use cbox_db::models::complaint::{Complaint, UpdateComplaint};
use cbox_db::repositories::ComplaintRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /verify_key
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VerifyKeyRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyKeyResponse {
    pub success: bool,
    pub permission_level: &'static str,
}

/// Verify an access key and report the permission level it grants.
pub async fn verify_key(
    State(state): State<AppState>,
    Json(input): Json<VerifyKeyRequest>,
) -> AppResult<impl IntoResponse> {
    match state.config.keys.permission_for(&input.key) {
        Some(permission_level) => Ok(Json(VerifyKeyResponse {
            success: true,
            permission_level,
        })),
        None => Err(AppError::Core(CoreError::Unauthorized("Invalid key".into()))),
    }
}

// ---------------------------------------------------------------------------
// GET /all_complaints
// ---------------------------------------------------------------------------

/// Full complaint list for the admin table, newest first.
pub async fn all_complaints(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let complaints = ComplaintRepo::list_all(&state.pool).await?;
    Ok(Json(complaints))
}

// ---------------------------------------------------------------------------
// POST /update_complaint
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateComplaintRequest {
    pub complaint_id: String,
    pub modify_key: String,
    #[serde(flatten)]
    pub changes: UpdateComplaint,
}

#[derive(Debug, Serialize)]
pub struct UpdatedFields {
    pub status: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
    pub updated_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct UpdateComplaintResponse {
    pub success: bool,
    pub message: String,
    pub updated: UpdatedFields,
}

/// Apply a partial update to a complaint.
///
/// The modify key is checked before anything else. A category or
/// subcategory change re-routes `assigned_to` through the routing table,
/// overriding any explicitly supplied assignee.
pub async fn update_complaint(
    State(state): State<AppState>,
    Json(input): Json<UpdateComplaintRequest>,
) -> AppResult<impl IntoResponse> {
    state.config.keys.require_modify(&input.modify_key)?;

    let id = complaint::normalize_id(&input.complaint_id);
    let mut changes = input.changes;

    if changes.is_empty() {
        return Err(CoreError::Validation(
            "Complaint ID and at least one field to update are required".into(),
        )
        .into());
    }
    if let Some(status) = &changes.status {
        complaint::validate_status(status)?;
    }
    if let Some(urgency) = &changes.urgency {
        complaint::validate_urgency(urgency)?;
    }

    if changes.category.is_some() || changes.subcategory.is_some() {
        let current = find_complaint(&state, &id).await?;
        let category = changes.category.as_deref().unwrap_or(&current.category);
        let subcategory = changes
            .subcategory
            .as_deref()
            .unwrap_or(&current.subcategory);
        changes.assigned_to = Some(state.routing.level1_department(category, subcategory));
    }

    let updated = ComplaintRepo::update(&state.pool, &id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id: id.clone(),
        }))?;

    tracing::info!(
        complaint_id = %id,
        status = %updated.status,
        assigned_to = %updated.assigned_to,
        "Complaint updated",
    );

    Ok(Json(UpdateComplaintResponse {
        success: true,
        message: format!("Complaint {id} updated successfully"),
        updated: UpdatedFields {
            status: updated.status,
            category: updated.category,
            subcategory: updated.subcategory,
            urgency: updated.urgency,
            assigned_to: updated.assigned_to,
            updated_at: updated.updated_at,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /delete_complaint
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DeleteComplaintRequest {
    pub complaint_id: String,
    pub modify_key: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteComplaintResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a complaint and (by cascade) its status history.
pub async fn delete_complaint(
    State(state): State<AppState>,
    Json(input): Json<DeleteComplaintRequest>,
) -> AppResult<impl IntoResponse> {
    state.config.keys.require_modify(&input.modify_key)?;

    let id = complaint::normalize_id(&input.complaint_id);
    let deleted = ComplaintRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }));
    }

    tracing::info!(complaint_id = %id, "Complaint deleted");

    Ok(Json(DeleteComplaintResponse {
        success: true,
        message: format!("Complaint {id} deleted successfully"),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_complaint(state: &AppState, id: &str) -> Result<Complaint, AppError> {
    ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id: id.to_string(),
        }))
}
