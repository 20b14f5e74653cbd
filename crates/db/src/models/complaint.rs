//! Complaint entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cbox_core::types::Timestamp;

/// A row from the `complaints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub complaint_id: String,
    pub user_input: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub status: String,
    pub assigned_to: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new complaint.
///
/// `status` is always the initial `Pending`; the repository sets it.
#[derive(Debug, Clone)]
pub struct CreateComplaint {
    pub complaint_id: String,
    pub user_input: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub assigned_to: String,
}

/// DTO for a partial admin update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComplaint {
    pub status: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub urgency: Option<String>,
    pub assigned_to: Option<String>,
}

impl UpdateComplaint {
    /// Whether the update changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.urgency.is_none()
            && self.assigned_to.is_none()
    }
}
