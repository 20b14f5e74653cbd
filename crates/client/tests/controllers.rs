//! Controller behavior tests over an in-memory gateway.
//!
//! `FakeGateway` records every call and replays scripted results, so
//! each test can assert both what went over the wire and what the
//! controller rendered -- no HTTP involved.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::TimeZone;

use cbox_client::admin::AdminController;
use cbox_client::alert::AlertKind;
use cbox_client::error::ClientError;
use cbox_client::gateway::ComplaintGateway;
use cbox_client::submission::{SubmissionController, SubmissionView};
use cbox_client::tracking::{auto_lookup_id, TrackingController, EMPTY_HISTORY_PLACEHOLDER};
use cbox_client::types::{
    ActionReply, AdminComplaintRow, KeyGrant, Prediction, StatusLogEntry, StatusReport,
    SubmitReceipt, SubmitRequest, Timestamp, UpdateRequest,
};

// ---------------------------------------------------------------------------
// FakeGateway
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Predict(String),
    Submit(SubmitRequest),
    GetStatus(String),
    VerifyKey(String),
    AllComplaints,
    Update(UpdateRequest),
    Delete {
        complaint_id: String,
        modify_key: String,
    },
}

/// Scripted gateway: results are queued per endpoint and popped per call.
#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    predictions: Mutex<VecDeque<Result<Prediction, ClientError>>>,
    submits: Mutex<VecDeque<Result<SubmitReceipt, ClientError>>>,
    statuses: Mutex<VecDeque<Result<StatusReport, ClientError>>>,
    grants: Mutex<VecDeque<Result<KeyGrant, ClientError>>>,
    lists: Mutex<VecDeque<Result<Vec<AdminComplaintRow>, ClientError>>>,
    updates: Mutex<VecDeque<Result<ActionReply, ClientError>>>,
    deletes: Mutex<VecDeque<Result<ActionReply, ClientError>>>,
}

impl FakeGateway {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn pop<T>(queue: &Mutex<VecDeque<Result<T, ClientError>>>, endpoint: &str) -> Result<T, ClientError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted result for {endpoint}"))
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComplaintGateway for FakeGateway {
    async fn predict(&self, complaint_text: &str) -> Result<Prediction, ClientError> {
        self.record(Call::Predict(complaint_text.to_string()));
        Self::pop(&self.predictions, "/predict")
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitReceipt, ClientError> {
        self.record(Call::Submit(request.clone()));
        Self::pop(&self.submits, "/submit")
    }

    async fn get_status(&self, complaint_id: &str) -> Result<StatusReport, ClientError> {
        self.record(Call::GetStatus(complaint_id.to_string()));
        Self::pop(&self.statuses, "/get_status")
    }

    async fn verify_key(&self, key: &str) -> Result<KeyGrant, ClientError> {
        self.record(Call::VerifyKey(key.to_string()));
        Self::pop(&self.grants, "/verify_key")
    }

    async fn all_complaints(&self) -> Result<Vec<AdminComplaintRow>, ClientError> {
        self.record(Call::AllComplaints);
        Self::pop(&self.lists, "/all_complaints")
    }

    async fn update_complaint(&self, request: &UpdateRequest) -> Result<ActionReply, ClientError> {
        self.record(Call::Update(request.clone()));
        Self::pop(&self.updates, "/update_complaint")
    }

    async fn delete_complaint(
        &self,
        complaint_id: &str,
        modify_key: &str,
    ) -> Result<ActionReply, ClientError> {
        self.record(Call::Delete {
            complaint_id: complaint_id.to_string(),
            modify_key: modify_key.to_string(),
        });
        Self::pop(&self.deletes, "/delete_complaint")
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn rejected(status: u16, message: Option<&str>) -> ClientError {
    ClientError::Rejected {
        status,
        message: message.map(str::to_string),
    }
}

fn sample_prediction() -> Prediction {
    Prediction {
        category: "Technical".into(),
        subcategory: "Connectivity".into(),
        urgency: "High".into(),
        assigned_to: "network.ops@example.com".into(),
        eta_message: "6 hours".into(),
        escalation_email: Some("it.manager@example.com".into()),
    }
}

fn sample_timestamp() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2026, 8, 1, 12, 30, 0).unwrap()
}

fn sample_report(logs: Vec<StatusLogEntry>) -> StatusReport {
    StatusReport {
        complaint_id: "AB12CD34".into(),
        complaint_text: "The office WiFi keeps dropping".into(),
        status: "In Progress".into(),
        urgency: "High".into(),
        assigned_to: "network.ops@example.com".into(),
        submitted_at: sample_timestamp(),
        eta_message: "6 hours".into(),
        escalation_email: Some("it.manager@example.com".into()),
        logs,
    }
}

fn log_entry(status: &str) -> StatusLogEntry {
    StatusLogEntry {
        status: status.into(),
        assigned_to: "network.ops@example.com".into(),
        timestamp: sample_timestamp(),
    }
}

fn admin_row(id: &str) -> AdminComplaintRow {
    AdminComplaintRow {
        complaint_id: id.into(),
        user_input: "row text".into(),
        status: "Pending".into(),
        assigned_to: "it.support@example.com".into(),
        created_at: sample_timestamp(),
    }
}

fn read_write_grant() -> KeyGrant {
    KeyGrant {
        success: true,
        permission_level: "read-write".into(),
    }
}

fn read_only_grant() -> KeyGrant {
    KeyGrant {
        success: true,
        permission_level: "read-only".into(),
    }
}

// ---------------------------------------------------------------------------
// Submission controller
// ---------------------------------------------------------------------------

/// Submitting empty text never issues a network call.
#[tokio::test]
async fn predict_blank_text_sends_nothing() {
    let gateway = Arc::new(FakeGateway::default());
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("   ").await;

    assert!(gateway.calls().is_empty());
    let alert = controller.banner.current().expect("alert shown");
    assert_eq!(alert.message, "Please enter your complaint.");
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(controller.view(), SubmissionView::Form);
}

/// Confirm before any successful predict is a no-op.
#[tokio::test]
async fn confirm_without_prediction_sends_nothing() {
    let gateway = Arc::new(FakeGateway::default());
    let mut controller = SubmissionController::new(gateway.clone());

    controller.confirm().await;

    assert!(gateway.calls().is_empty());
}

/// The prediction panel renders the exact layout.
#[tokio::test]
async fn prediction_panel_text_is_exact() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.predictions.lock().unwrap().push_back(Ok(Prediction {
        category: "Billing".into(),
        subcategory: "Charges".into(),
        urgency: "Low".into(),
        assigned_to: "Billing".into(),
        eta_message: "2 days".into(),
        escalation_email: Some("x@y.com".into()),
    }));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("my bill is wrong").await;

    assert_eq!(
        controller.prediction_text(),
        "Assigned Department : Billing\nEstimated Resolution : 2 days\nEscalation Contact  : x@y.com"
    );
    assert_eq!(controller.view(), SubmissionView::Prediction);
}

/// A missing escalation contact renders as N/A.
#[tokio::test]
async fn prediction_panel_renders_missing_escalation_as_na() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.predictions.lock().unwrap().push_back(Ok(Prediction {
        escalation_email: None,
        ..sample_prediction()
    }));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("no wifi").await;

    assert!(controller.prediction_text().ends_with("Escalation Contact  : N/A"));
}

/// Confirm sends exactly the original text plus the four cached fields.
#[tokio::test]
async fn confirm_sends_cached_prediction_fields() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .predictions
        .lock()
        .unwrap()
        .push_back(Ok(sample_prediction()));
    gateway.submits.lock().unwrap().push_back(Ok(SubmitReceipt {
        complaint_id: "AB12CD34".into(),
    }));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("  The office WiFi keeps dropping  ").await;
    controller.confirm().await;

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call::Submit(SubmitRequest {
            complaint_text: "The office WiFi keeps dropping".into(),
            category: "Technical".into(),
            subcategory: "Connectivity".into(),
            urgency: "High".into(),
            assigned_to: "network.ops@example.com".into(),
        })
    );

    assert_eq!(controller.view(), SubmissionView::Confirmation);
    assert_eq!(controller.complaint_id(), Some("AB12CD34"));
    let confirmation = controller.confirmation_text();
    assert!(confirmation.contains("Complaint ID            : AB12CD34"));
    assert!(confirmation.contains("Status                  : Pending"));
    assert!(confirmation.contains("Resolution ETA          : 6 hours"));
    assert_eq!(controller.banner.message(), Some("Complaint submitted successfully!"));
}

/// A failed prediction surfaces the server error and leaves the form
/// usable; a later confirm still sends nothing.
#[tokio::test]
async fn predict_failure_keeps_form_usable() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.predictions.lock().unwrap().push_back(Err(rejected(
        500,
        Some("Prediction models not loaded. Please train first."),
    )));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("no wifi").await;

    assert_eq!(
        controller.banner.message(),
        Some("Prediction models not loaded. Please train first.")
    );
    assert_eq!(controller.view(), SubmissionView::Form);
    assert!(controller.predicted().is_none());

    controller.confirm().await;
    assert_eq!(gateway.calls().len(), 1, "confirm must not call /submit");
}

/// A rejection without a body message falls back to the generic string.
#[tokio::test]
async fn predict_failure_without_message_uses_fallback() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .predictions
        .lock()
        .unwrap()
        .push_back(Err(rejected(502, None)));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("no wifi").await;

    assert_eq!(controller.banner.message(), Some("Failed to analyze."));
}

/// A failed submission keeps the prediction view active for retry.
#[tokio::test]
async fn submit_failure_keeps_prediction_for_retry() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .predictions
        .lock()
        .unwrap()
        .push_back(Ok(sample_prediction()));
    gateway
        .submits
        .lock()
        .unwrap()
        .push_back(Err(rejected(500, Some("Internal error during submission"))));
    let mut controller = SubmissionController::new(gateway.clone());

    controller.predict("no wifi").await;
    controller.confirm().await;

    assert_eq!(controller.view(), SubmissionView::Prediction);
    assert!(controller.predicted().is_some());
    assert_eq!(controller.complaint_id(), None);
    assert_eq!(
        controller.banner.message(),
        Some("Internal error during submission")
    );
}

// ---------------------------------------------------------------------------
// Tracking controller
// ---------------------------------------------------------------------------

/// A blank id never issues a network call.
#[tokio::test]
async fn lookup_blank_id_sends_nothing() {
    let gateway = Arc::new(FakeGateway::default());
    let mut controller = TrackingController::new(gateway.clone());

    controller.lookup("  ").await;

    assert!(gateway.calls().is_empty());
    assert_eq!(controller.banner.message(), Some("Please enter a Complaint ID."));
}

/// A successful lookup renders details and history in server order and
/// binds the copy target to the fetched id.
#[tokio::test]
async fn lookup_renders_details_and_history() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.statuses.lock().unwrap().push_back(Ok(sample_report(vec![
        log_entry("Pending"),
        log_entry("In Progress"),
    ])));
    let mut controller = TrackingController::new(gateway.clone());

    assert_eq!(controller.copy_target(), None);

    controller.lookup("ab12cd34").await;

    assert_eq!(gateway.calls(), vec![Call::GetStatus("ab12cd34".into())]);

    let details = controller.details_text();
    assert!(details.contains("Complaint ID            : AB12CD34"));
    assert!(details.contains("Current Status          : In Progress"));
    assert!(details.contains("Complaint               : The office WiFi keeps dropping"));

    let history = controller.history_lines();
    assert_eq!(history.len(), 2);
    assert!(history[0].starts_with("Status   : Pending"));
    assert!(history[1].starts_with("Status   : In Progress"));

    assert_eq!(controller.copy_target(), Some("AB12CD34"));
    assert_eq!(controller.banner.message(), Some("Complaint details loaded."));
}

/// An empty history renders the placeholder line.
#[tokio::test]
async fn lookup_empty_history_shows_placeholder() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .statuses
        .lock()
        .unwrap()
        .push_back(Ok(sample_report(vec![])));
    let mut controller = TrackingController::new(gateway.clone());

    controller.lookup("AB12CD34").await;

    let history = controller.history_lines();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], EMPTY_HISTORY_PLACEHOLDER);
}

/// A failed lookup surfaces the server error, or the fallback when the
/// body carried none.
#[tokio::test]
async fn lookup_failure_shows_error() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .statuses
        .lock()
        .unwrap()
        .push_back(Err(rejected(404, Some("Complaint NOPE1234 not found"))));
    gateway
        .statuses
        .lock()
        .unwrap()
        .push_back(Err(rejected(404, None)));
    let mut controller = TrackingController::new(gateway.clone());

    controller.lookup("NOPE1234").await;
    assert_eq!(controller.banner.message(), Some("Complaint NOPE1234 not found"));
    assert_eq!(controller.copy_target(), None);

    controller.lookup("NOPE1234").await;
    assert_eq!(controller.banner.message(), Some("Complaint not found."));
}

/// A page URL with `?id=` drives a lookup with no user action.
#[tokio::test]
async fn auto_lookup_runs_from_page_url() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .statuses
        .lock()
        .unwrap()
        .push_back(Ok(sample_report(vec![log_entry("Pending")])));
    let mut controller = TrackingController::new(gateway.clone());

    if let Some(id) = auto_lookup_id("http://localhost:3000/track?id=ABC123") {
        controller.lookup(&id).await;
    }

    assert_eq!(gateway.calls(), vec![Call::GetStatus("ABC123".into())]);
}

// ---------------------------------------------------------------------------
// Admin controller
// ---------------------------------------------------------------------------

/// A blank key never issues a network call.
#[tokio::test]
async fn verify_blank_key_sends_nothing() {
    let gateway = Arc::new(FakeGateway::default());
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("").await;

    assert!(gateway.calls().is_empty());
    assert_eq!(controller.banner.message(), Some("Please enter key."));
    assert!(!controller.panel_visible());
}

/// A read-write grant stores the key and renders rows with controls
/// enabled, preserving server order.
#[tokio::test]
async fn read_write_grant_enables_controls() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_write_grant()));
    gateway
        .lists
        .lock()
        .unwrap()
        .push_back(Ok(vec![admin_row("BB"), admin_row("AA")]));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("modify-secret").await;

    assert!(controller.panel_visible());
    assert!(controller.has_modify_access());

    let rows = controller.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].complaint.complaint_id, "BB");
    assert_eq!(rows[1].complaint.complaint_id, "AA");
    assert!(rows.iter().all(|row| row.controls_enabled));
}

/// A read-only grant reveals the panel but never stores the key, even
/// though verification succeeded; mutation controls stay disabled and a
/// later update sends nothing.
#[tokio::test]
async fn read_only_grant_disables_mutations() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_only_grant()));
    gateway
        .lists
        .lock()
        .unwrap()
        .push_back(Ok(vec![admin_row("AA")]));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("admin-secret").await;

    assert!(controller.panel_visible());
    assert!(!controller.has_modify_access());
    assert!(controller.rows().iter().all(|row| !row.controls_enabled));

    controller.update("AA", "Resolved", "x@y.com").await;
    controller.delete("AA", true).await;

    // Only verify + list went over the wire.
    assert_eq!(
        gateway.calls(),
        vec![Call::VerifyKey("admin-secret".into()), Call::AllComplaints]
    );
    assert_eq!(controller.rows().len(), 1);
}

/// A rejected key surfaces the server error and reveals nothing.
#[tokio::test]
async fn invalid_key_is_rejected() {
    let gateway = Arc::new(FakeGateway::default());
    gateway
        .grants
        .lock()
        .unwrap()
        .push_back(Err(rejected(401, Some("Invalid key"))));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("wrong").await;

    assert!(!controller.panel_visible());
    assert_eq!(controller.banner.message(), Some("Invalid key"));
    assert_eq!(gateway.calls(), vec![Call::VerifyKey("wrong".into())]);
}

/// Every update carries the modify key so the server can re-authorize.
#[tokio::test]
async fn update_sends_key_with_every_call() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_write_grant()));
    gateway.lists.lock().unwrap().push_back(Ok(vec![admin_row("AA")]));
    gateway.updates.lock().unwrap().push_back(Ok(ActionReply {
        success: true,
        message: "Complaint AA updated successfully".into(),
    }));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("modify-secret").await;
    controller.update("AA", "Resolved", "x@y.com").await;

    assert_eq!(
        gateway.calls().last(),
        Some(&Call::Update(UpdateRequest {
            complaint_id: "AA".into(),
            modify_key: "modify-secret".into(),
            status: "Resolved".into(),
            assigned_to: "x@y.com".into(),
        }))
    );
    assert_eq!(
        controller.banner.message(),
        Some("Complaint AA updated successfully")
    );
}

/// Declining the delete confirmation issues no request and keeps the row.
#[tokio::test]
async fn declined_delete_sends_nothing() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_write_grant()));
    gateway.lists.lock().unwrap().push_back(Ok(vec![admin_row("AA")]));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("modify-secret").await;
    controller.delete("AA", false).await;

    assert_eq!(
        gateway.calls(),
        vec![
            Call::VerifyKey("modify-secret".into()),
            Call::AllComplaints
        ]
    );
    assert_eq!(controller.rows().len(), 1);
}

/// A confirmed delete removes exactly the deleted row.
#[tokio::test]
async fn confirmed_delete_removes_row() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_write_grant()));
    gateway
        .lists
        .lock()
        .unwrap()
        .push_back(Ok(vec![admin_row("AA"), admin_row("BB")]));
    gateway.deletes.lock().unwrap().push_back(Ok(ActionReply {
        success: true,
        message: "Complaint AA deleted successfully".into(),
    }));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("modify-secret").await;
    controller.delete("AA", true).await;

    assert_eq!(
        gateway.calls().last(),
        Some(&Call::Delete {
            complaint_id: "AA".into(),
            modify_key: "modify-secret".into(),
        })
    );
    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].complaint.complaint_id, "BB");
}

/// A failed delete keeps the row and surfaces the error.
#[tokio::test]
async fn failed_delete_keeps_row() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.grants.lock().unwrap().push_back(Ok(read_write_grant()));
    gateway.lists.lock().unwrap().push_back(Ok(vec![admin_row("AA")]));
    gateway
        .deletes
        .lock()
        .unwrap()
        .push_back(Err(rejected(404, Some("Complaint AA not found"))));
    let mut controller = AdminController::new(gateway.clone());

    controller.verify_key("modify-secret").await;
    controller.delete("AA", true).await;

    assert_eq!(controller.rows().len(), 1);
    assert_eq!(controller.banner.message(), Some("Complaint AA not found"));
}

/// The status selector offers exactly the three lifecycle statuses.
#[tokio::test]
async fn status_options_match_lifecycle() {
    let options = AdminController::<Arc<FakeGateway>>::status_options();
    assert_eq!(options, &["Pending", "In Progress", "Resolved"]);
}
