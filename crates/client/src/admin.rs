//! Admin page controller.
//!
//! Key verification reveals the panel; the key is retained for
//! mutations only when the server grants `read-write`. Row controls are
//! presented disabled without that key -- presentation only, the server
//! re-checks the key on every mutation.

use cbox_core::complaint::VALID_STATUSES;
use cbox_core::permissions::PERMISSION_READ_WRITE;

use crate::alert::AlertBanner;
use crate::gateway::ComplaintGateway;
use crate::types::{AdminComplaintRow, UpdateRequest};

/// One row of the admin table: the complaint plus whether its edit
/// controls (status selector, assignee field, buttons) are enabled.
#[derive(Debug, Clone)]
pub struct ComplaintRowView {
    pub complaint: AdminComplaintRow,
    pub controls_enabled: bool,
}

/// Controller for the admin page.
///
/// The in-memory modify key is the only state shared across calls:
/// written by a successful `read-write` verification, read by every
/// mutation, gone on page reload.
pub struct AdminController<G> {
    gateway: G,
    pub banner: AlertBanner,
    panel_visible: bool,
    modify_key: Option<String>,
    rows: Vec<ComplaintRowView>,
}

impl<G: ComplaintGateway> AdminController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            banner: AlertBanner::new(),
            panel_visible: false,
            modify_key: None,
            rows: Vec::new(),
        }
    }

    /// Verify an access key and, on success, reveal the panel and load
    /// the complaint list.
    ///
    /// The key becomes the modify key only for a `read-write` grant; a
    /// `read-only` grant shows the panel with mutation controls
    /// disabled, even though verification succeeded.
    pub async fn verify_key(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            self.banner.error("Please enter key.");
            return;
        }

        self.banner.success("Verifying...");

        match self.gateway.verify_key(key).await {
            Ok(grant) if grant.success => {
                self.panel_visible = true;
                self.modify_key = (grant.permission_level == PERMISSION_READ_WRITE)
                    .then(|| key.to_string());
                self.banner.success("Access granted.");
                self.load_complaints().await;
            }
            Ok(_) => self.banner.error("Invalid key."),
            Err(e) => self.banner.error(e.user_message("Invalid key.")),
        }
    }

    /// Fetch the complaint list and rebuild the row views, one per
    /// complaint, in server order.
    pub async fn load_complaints(&mut self) {
        match self.gateway.all_complaints().await {
            Ok(complaints) => {
                let controls_enabled = self.modify_key.is_some();
                self.rows = complaints
                    .into_iter()
                    .map(|complaint| ComplaintRowView {
                        complaint,
                        controls_enabled,
                    })
                    .collect();
            }
            Err(e) => self.banner.error(e.user_message("Failed to load.")),
        }
    }

    /// Send a row's edited status and assignee to the backend.
    ///
    /// A no-op without a modify key, mirroring the disabled controls.
    pub async fn update(&mut self, complaint_id: &str, status: &str, assigned_to: &str) {
        let Some(modify_key) = self.modify_key.clone() else {
            return;
        };

        let request = UpdateRequest {
            complaint_id: complaint_id.to_string(),
            modify_key,
            status: status.to_string(),
            assigned_to: assigned_to.to_string(),
        };

        match self.gateway.update_complaint(&request).await {
            Ok(reply) if reply.success => self.banner.success(reply.message),
            Ok(_) => self.banner.error("Update failed."),
            Err(e) => self.banner.error(e.user_message("Update failed.")),
        }
    }

    /// Delete a complaint, but only when the user confirmed the prompt.
    /// Declining sends nothing and leaves the row in place.
    pub async fn delete(&mut self, complaint_id: &str, confirmed: bool) {
        if !confirmed {
            return;
        }
        let Some(modify_key) = self.modify_key.clone() else {
            return;
        };

        match self.gateway.delete_complaint(complaint_id, &modify_key).await {
            Ok(reply) if reply.success => {
                self.rows
                    .retain(|row| row.complaint.complaint_id != complaint_id);
                self.banner.success(reply.message);
            }
            Ok(_) => self.banner.error("Delete failed."),
            Err(e) => self.banner.error(e.user_message("Delete failed.")),
        }
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Whether a `read-write` key is held.
    pub fn has_modify_access(&self) -> bool {
        self.modify_key.is_some()
    }

    /// The rendered admin table rows.
    pub fn rows(&self) -> &[ComplaintRowView] {
        &self.rows
    }

    /// The options of each row's status selector.
    pub fn status_options() -> &'static [&'static str] {
        VALID_STATUSES
    }
}
