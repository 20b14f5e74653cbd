//! Status log entity model.

use serde::Serialize;
use sqlx::FromRow;

use cbox_core::types::{DbId, Timestamp};

/// A row from the `status_log` table. Append-only; never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusLogEntry {
    #[serde(skip_serializing)]
    pub log_id: DbId,
    #[serde(skip_serializing)]
    pub complaint_id: String,
    pub status: String,
    pub assigned_to: String,
    pub timestamp: Timestamp,
}
