//! Handlers for the two-step submission flow.
//!
//! `/predict` classifies free text and proposes routing without
//! persisting anything; `/submit` creates the complaint (with its initial
//! status log entry) from a confirmed prediction and notifies the
//! assigned department.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use cbox_core::complaint;
use cbox_core::error::CoreError;
use cbox_core::types::Timestamp;
use cbox_db::models::complaint::CreateComplaint;
use cbox_db::repositories::ComplaintRepo;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub complaint_text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub complaint_text: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub eta_message: String,
    pub assigned_to: String,
    pub escalation_email: String,
}

/// Classify complaint text and propose routing and an ETA.
///
/// Nothing is persisted; the caller confirms via `/submit`.
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PredictRequest>,
) -> AppResult<impl IntoResponse> {
    complaint::validate_complaint_text(&input.complaint_text)?;

    let classification = state.classifier.classify(&input.complaint_text)?;

    let assigned_to = state
        .routing
        .level1_department(&classification.category, &classification.subcategory);
    let escalation_email = state
        .routing
        .level2_department(&classification.category, &classification.subcategory);

    Ok(Json(PredictResponse {
        complaint_text: input.complaint_text,
        eta_message: complaint::eta_message(&classification.urgency),
        category: classification.category,
        subcategory: classification.subcategory,
        urgency: classification.urgency,
        assigned_to,
        escalation_email,
    }))
}

// ---------------------------------------------------------------------------
// POST /submit
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, max = 500))]
    pub complaint_text: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub subcategory: String,
    #[validate(length(min = 1))]
    pub urgency: String,
    #[validate(length(min = 1))]
    pub assigned_to: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub complaint_id: String,
    pub message: String,
    pub submitted_at: Timestamp,
    pub status: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
    pub eta_message: String,
    pub escalation_email: String,
}

/// Persist a confirmed complaint and notify the assigned department.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|_| CoreError::Validation("Missing required data".into()))?;
    complaint::validate_urgency(&input.urgency)?;

    let create = CreateComplaint {
        complaint_id: complaint::new_complaint_id(),
        user_input: input.complaint_text,
        category: input.category,
        subcategory: input.subcategory,
        urgency: input.urgency,
        assigned_to: input.assigned_to,
    };
    let created = ComplaintRepo::create(&state.pool, &create).await?;

    let eta_message = complaint::eta_message(&created.urgency);
    let escalation_email = state
        .routing
        .level2_department(&created.category, &created.subcategory);

    // Delivery problems are logged inside the notifier; the complaint is
    // already committed at this point.
    state.notifier.notify_assignment(&created, &eta_message).await;

    tracing::info!(
        complaint_id = %created.complaint_id,
        category = %created.category,
        urgency = %created.urgency,
        "Complaint submitted",
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: "Complaint submitted successfully!".into(),
        complaint_id: created.complaint_id,
        submitted_at: created.created_at,
        status: created.status,
        category: created.category,
        subcategory: created.subcategory,
        urgency: created.urgency,
        assigned_to: created.assigned_to,
        eta_message,
        escalation_email,
    }))
}
