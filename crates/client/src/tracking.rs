//! Tracking page controller.
//!
//! Looks up a complaint by id and renders its detail panel and status
//! history in server order. The copy-to-clipboard target is bound only
//! after a successful lookup, so there is never an absent id to copy.

use crate::alert::AlertBanner;
use crate::gateway::ComplaintGateway;
use crate::types::{StatusLogEntry, StatusReport};

/// Shown in place of the history when a complaint has no log entries.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No status history available.";

/// Controller for the status tracking page.
pub struct TrackingController<G> {
    gateway: G,
    pub banner: AlertBanner,
    report: Option<StatusReport>,
    details_text: String,
    history_lines: Vec<String>,
}

impl<G: ComplaintGateway> TrackingController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            banner: AlertBanner::new(),
            report: None,
            details_text: String::new(),
            history_lines: Vec::new(),
        }
    }

    /// Fetch and render a complaint's detail and history.
    ///
    /// Blank input never reaches the network. Log entries are rendered
    /// in the order the server returned them.
    pub async fn lookup(&mut self, complaint_id: &str) {
        let complaint_id = complaint_id.trim();
        if complaint_id.is_empty() {
            self.banner.error("Please enter a Complaint ID.");
            return;
        }

        self.banner.success("Loading details...");
        self.details_text = "Fetching complaint details...".to_string();
        self.history_lines.clear();

        match self.gateway.get_status(complaint_id).await {
            Ok(report) => {
                self.details_text = render_details(&report);
                self.history_lines = if report.logs.is_empty() {
                    vec![EMPTY_HISTORY_PLACEHOLDER.to_string()]
                } else {
                    report.logs.iter().map(render_log_entry).collect()
                };
                self.report = Some(report);
                self.banner.success("Complaint details loaded.");
            }
            Err(e) => {
                self.banner.error(e.user_message("Complaint not found."));
            }
        }
    }

    /// The id the copy-to-clipboard control copies: the id of the last
    /// successfully fetched complaint, or nothing before the first
    /// successful lookup.
    pub fn copy_target(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.complaint_id.as_str())
    }

    /// The last successfully fetched report.
    pub fn report(&self) -> Option<&StatusReport> {
        self.report.as_ref()
    }

    /// Text of the detail panel.
    pub fn details_text(&self) -> &str {
        &self.details_text
    }

    /// Rendered history entries (or the empty-history placeholder).
    pub fn history_lines(&self) -> &[String] {
        &self.history_lines
    }
}

/// Extract the `id` query parameter from a page URL, for running a
/// lookup on load when the page was opened via a shareable link.
pub fn auto_lookup_id(page_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(page_url).ok()?;
    url.query_pairs()
        .find(|(name, value)| name == "id" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn render_details(report: &StatusReport) -> String {
    format!(
        "Complaint ID            : {id}\n\
         Submitted On            : {submitted}\n\
         \n\
         Current Status          : {status}\n\
         Assigned Department     : {department}\n\
         \n\
         Urgency                 : {urgency}\n\
         Complaint               : {text}\n\
         \n\
         Expected Resolution     : {eta}\n\
         Escalation Contact      : {escalation}",
        id = report.complaint_id,
        submitted = report
            .submitted_at
            .with_timezone(&chrono::Local)
            .format("%d-%m-%Y %H:%M"),
        status = report.status,
        department = report.assigned_to,
        urgency = report.urgency,
        text = report.complaint_text,
        eta = report.eta_message,
        escalation = report.escalation_email.as_deref().unwrap_or("N/A"),
    )
}

fn render_log_entry(log: &StatusLogEntry) -> String {
    format!(
        "Status   : {}\n\
         Assigned : {}\n\
         Time     : {}",
        log.status,
        log.assigned_to,
        log.timestamp
            .with_timezone(&chrono::Local)
            .format("%d-%m-%Y %H:%M"),
    )
}
