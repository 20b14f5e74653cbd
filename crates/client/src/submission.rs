//! Submission page controller.
//!
//! Two-step flow: `predict` proposes routing for review, `confirm`
//! commits the complaint. Confirmation is impossible without a prior
//! successful prediction -- the server re-validates, but the ordering is
//! enforced here too.

use crate::alert::AlertBanner;
use crate::gateway::ComplaintGateway;
use crate::types::{Prediction, SubmitRequest};

/// Which panel the submission page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionView {
    /// The complaint form, no prediction yet.
    Form,
    /// A prediction awaiting confirmation.
    Prediction,
    /// The post-submit confirmation summary.
    Confirmation,
}

/// Controller for the complaint submission page.
pub struct SubmissionController<G> {
    gateway: G,
    pub banner: AlertBanner,
    view: SubmissionView,
    predicted: Option<Prediction>,
    submitted_text: String,
    complaint_id: Option<String>,
    prediction_text: String,
    confirmation_text: String,
}

impl<G: ComplaintGateway> SubmissionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            banner: AlertBanner::new(),
            view: SubmissionView::Form,
            predicted: None,
            submitted_text: String::new(),
            complaint_id: None,
            prediction_text: String::new(),
            confirmation_text: String::new(),
        }
    }

    /// Step 1: request a classification for the entered text.
    ///
    /// Blank input never reaches the network. On success the prediction
    /// is cached for [`confirm`](Self::confirm) and the prediction panel
    /// is rendered; on failure the form stays usable.
    pub async fn predict(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.banner.error("Please enter your complaint.");
            return;
        }

        self.banner.success("Analyzing complaint...");
        self.view = SubmissionView::Form;

        match self.gateway.predict(text).await {
            Ok(prediction) => {
                self.prediction_text = render_prediction(&prediction);
                self.predicted = Some(prediction);
                self.submitted_text = text.to_string();
                self.view = SubmissionView::Prediction;
                self.banner
                    .success("Analysis complete! Please confirm to submit.");
            }
            Err(e) => {
                self.banner.error(e.user_message("Failed to analyze."));
            }
        }
    }

    /// Step 2: submit the reviewed prediction.
    ///
    /// A no-op unless a prediction is cached. Sends the original text
    /// plus the four cached classification fields; on failure the
    /// prediction panel stays up for retry.
    pub async fn confirm(&mut self) {
        let Some(prediction) = self.predicted.clone() else {
            return;
        };

        self.banner.success("Submitting complaint...");

        let request = SubmitRequest {
            complaint_text: self.submitted_text.clone(),
            category: prediction.category.clone(),
            subcategory: prediction.subcategory.clone(),
            urgency: prediction.urgency.clone(),
            assigned_to: prediction.assigned_to.clone(),
        };

        match self.gateway.submit(&request).await {
            Ok(receipt) => {
                self.confirmation_text =
                    render_confirmation(&receipt.complaint_id, &prediction, chrono::Local::now());
                self.complaint_id = Some(receipt.complaint_id);
                self.view = SubmissionView::Confirmation;
                self.banner.success("Complaint submitted successfully!");
            }
            Err(e) => {
                self.banner.error(e.user_message("Submission failed."));
            }
        }
    }

    pub fn view(&self) -> SubmissionView {
        self.view
    }

    /// The cached prediction, if step 1 succeeded.
    pub fn predicted(&self) -> Option<&Prediction> {
        self.predicted.as_ref()
    }

    /// The generated id, once submitted.
    pub fn complaint_id(&self) -> Option<&str> {
        self.complaint_id.as_deref()
    }

    /// Text of the prediction panel.
    pub fn prediction_text(&self) -> &str {
        &self.prediction_text
    }

    /// Text of the confirmation summary.
    pub fn confirmation_text(&self) -> &str {
        &self.confirmation_text
    }
}

fn render_prediction(prediction: &Prediction) -> String {
    format!(
        "Assigned Department : {}\n\
         Estimated Resolution : {}\n\
         Escalation Contact  : {}",
        prediction.assigned_to,
        prediction.eta_message,
        prediction.escalation_email.as_deref().unwrap_or("N/A"),
    )
}

fn render_confirmation(
    complaint_id: &str,
    prediction: &Prediction,
    submitted_at: chrono::DateTime<chrono::Local>,
) -> String {
    format!(
        "Complaint ID            : {id}\n\
         Submitted On            : {submitted}\n\
         \n\
         Status                  : Pending\n\
         Assigned Department     : {department}\n\
         \n\
         Resolution ETA          : {eta}\n\
         Escalation Contact      : {escalation}",
        id = complaint_id,
        submitted = submitted_at.format("%d-%m-%Y %H:%M"),
        department = prediction.assigned_to,
        eta = prediction.eta_message,
        escalation = prediction.escalation_email.as_deref().unwrap_or("N/A"),
    )
}
