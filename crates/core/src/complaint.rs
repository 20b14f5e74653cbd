//! Complaint vocabulary, identifiers, and ETA formatting.
//!
//! Defines the valid statuses and urgencies, validation helpers used by
//! the API and repository layers, the complaint-id scheme, and the
//! urgency-to-ETA message mapping shown to users.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted complaint.
pub const STATUS_PENDING: &str = "Pending";
/// The assigned department is working on the complaint.
pub const STATUS_IN_PROGRESS: &str = "In Progress";
/// The complaint has been resolved.
pub const STATUS_RESOLVED: &str = "Resolved";

/// All valid complaint statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_RESOLVED];

// ---------------------------------------------------------------------------
// Urgency constants
// ---------------------------------------------------------------------------

pub const URGENCY_HIGH: &str = "High";
pub const URGENCY_MEDIUM: &str = "Medium";
pub const URGENCY_LOW: &str = "Low";

/// All valid urgency levels.
pub const VALID_URGENCIES: &[&str] = &[URGENCY_HIGH, URGENCY_MEDIUM, URGENCY_LOW];

/// Maximum length for the user-provided complaint text (characters).
pub const MAX_COMPLAINT_TEXT_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
///
/// Any known status may follow any other; there is no transition matrix.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate that an urgency string is one of the known levels.
pub fn validate_urgency(urgency: &str) -> Result<(), CoreError> {
    if VALID_URGENCIES.contains(&urgency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid urgency '{}'. Must be one of: {:?}",
            urgency, VALID_URGENCIES
        )))
    }
}

/// Validate the free-text complaint body: non-blank, within length limit.
pub fn validate_complaint_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Complaint text is required".to_string(),
        ));
    }
    if text.len() > MAX_COMPLAINT_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Complaint text exceeds maximum length of {} characters (got {})",
            MAX_COMPLAINT_TEXT_LENGTH,
            text.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Generate a new complaint id: the first segment of a UUIDv4, uppercased.
///
/// Short enough to read over the phone, random enough not to collide in
/// practice (the insert will surface a conflict if one ever does).
pub fn new_complaint_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or(&id).to_uppercase()
}

/// Normalize a user-supplied complaint id for lookup (trim + uppercase).
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// ETA formatting
// ---------------------------------------------------------------------------

/// Human-readable resolution estimate for an urgency level.
///
/// High resolves in 6 hours, Medium in 12, Low in 48; anything unknown
/// gets the 72-hour catch-all. Durations of a day or more render as days.
pub fn eta_message(urgency: &str) -> String {
    let eta_hours: u32 = match urgency {
        URGENCY_HIGH => 6,
        URGENCY_MEDIUM => 12,
        URGENCY_LOW => 48,
        _ => 72,
    };
    if eta_hours >= 24 {
        let days = eta_hours / 24;
        let remainder = eta_hours % 24;
        if remainder == 0 {
            format!("{days} days")
        } else {
            format!("{days} days and {remainder} hours")
        }
    } else {
        format!("{eta_hours} hours")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
