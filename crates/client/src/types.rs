//! Wire types exchanged with the backend.
//!
//! Field names match the JSON contract; unknown response fields are
//! ignored so the backend can grow without breaking deployed clients.

use serde::{Deserialize, Serialize};

/// All wire timestamps are RFC 3339 in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Response of `POST /predict`: proposed classification and routing.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
    pub eta_message: String,
    pub escalation_email: Option<String>,
}

/// Request body of `POST /submit`: the original text plus the four
/// confirmed classification fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitRequest {
    pub complaint_text: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
}

/// Response of `POST /submit`; only the generated id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReceipt {
    pub complaint_id: String,
}

/// One status transition, as returned in `logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusLogEntry {
    pub status: String,
    pub assigned_to: String,
    pub timestamp: Timestamp,
}

/// Response of `GET /get_status/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    pub complaint_id: String,
    pub complaint_text: String,
    pub status: String,
    pub urgency: String,
    pub assigned_to: String,
    pub submitted_at: Timestamp,
    pub eta_message: String,
    pub escalation_email: Option<String>,
    #[serde(default)]
    pub logs: Vec<StatusLogEntry>,
}

/// Response of `POST /verify_key`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyGrant {
    pub success: bool,
    pub permission_level: String,
}

/// One row of `GET /all_complaints`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminComplaintRow {
    pub complaint_id: String,
    pub user_input: String,
    pub status: String,
    pub assigned_to: String,
    pub created_at: Timestamp,
}

/// Request body of `POST /update_complaint`. The modify key travels in
/// every mutation so the server re-authorizes per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRequest {
    pub complaint_id: String,
    pub modify_key: String,
    pub status: String,
    pub assigned_to: String,
}

/// Response of `POST /update_complaint` and `POST /delete_complaint`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionReply {
    pub success: bool,
    pub message: String,
}
