//! Assignment email notifications via SMTP.
//!
//! When a complaint is submitted, the assigned department gets a
//! plain-text email. [`EmailConfig::from_env`] returns `None` when
//! `SMTP_HOST` is not set; the notifier then logs the message it would
//! have sent instead of delivering it, so local development needs no mail
//! server. Demo mode (`DEMO_MODE=true`) reroutes every message to
//! `DEMO_EMAIL` and prefixes subjects with `[DEMO]`.
//!
//! Delivery failures are logged and never fail the submission.

use cbox_db::models::complaint::Complaint;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@complaintbox.local";

/// Default redirect address for demo mode when `DEMO_EMAIL` is not set.
const DEFAULT_DEMO_ADDRESS: &str = "demo@example.com";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and messages should only be logged.
    ///
    /// | Variable        | Required | Default                      |
    /// |-----------------|----------|------------------------------|
    /// | `SMTP_HOST`     | yes      | —                            |
    /// | `SMTP_PORT`     | no       | `587`                        |
    /// | `SMTP_FROM`     | no       | `noreply@complaintbox.local` |
    /// | `SMTP_USER`     | no       | —                            |
    /// | `SMTP_PASSWORD` | no       | —                            |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends plain-text emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a plain-text email to the given address.
    pub async fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject, "Notification email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ComplaintNotifier
// ---------------------------------------------------------------------------

/// Sends the assignment notification for a newly submitted complaint.
///
/// Holds the optional SMTP delivery plus the demo-mode redirect. The
/// notifier never returns an error: a failed or skipped delivery is a
/// log line, not a failed submission.
pub struct ComplaintNotifier {
    delivery: Option<EmailDelivery>,
    demo_redirect: Option<String>,
}

impl ComplaintNotifier {
    pub fn new(delivery: Option<EmailDelivery>, demo_redirect: Option<String>) -> Self {
        Self {
            delivery,
            demo_redirect,
        }
    }

    /// Build a notifier from the environment (`SMTP_*`, `DEMO_MODE`,
    /// `DEMO_EMAIL`).
    pub fn from_env() -> Self {
        let delivery = EmailConfig::from_env().map(EmailDelivery::new);
        let demo_mode = std::env::var("DEMO_MODE")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let demo_redirect = demo_mode.then(|| {
            std::env::var("DEMO_EMAIL").unwrap_or_else(|_| DEFAULT_DEMO_ADDRESS.to_string())
        });
        Self::new(delivery, demo_redirect)
    }

    /// Notify the assigned department about a new complaint.
    pub async fn notify_assignment(&self, complaint: &Complaint, eta_message: &str) {
        let (mut subject, body) = build_assignment_email(complaint, eta_message);

        let to = match &self.demo_redirect {
            Some(redirect) => {
                tracing::info!(
                    original = %complaint.assigned_to,
                    redirect = %redirect,
                    "Demo mode: rerouting assignment email"
                );
                subject = format!("[DEMO] {subject}");
                redirect.clone()
            }
            None => complaint.assigned_to.clone(),
        };

        match &self.delivery {
            Some(delivery) => {
                if let Err(e) = delivery.send(&to, &subject, &body).await {
                    tracing::warn!(to = %to, error = %e, "Failed to send assignment email");
                }
            }
            None => {
                tracing::info!(to = %to, subject = %subject, body = %body, "SMTP not configured, logging assignment email");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Build the subject and plain-text body of the assignment email.
pub fn build_assignment_email(complaint: &Complaint, eta_message: &str) -> (String, String) {
    let subject = format!(
        "[Complaint Box] Complaint #{} - {} | {}",
        complaint.complaint_id, complaint.category, complaint.subcategory
    );

    let body = format!(
        "Dear {recipient},\n\
         \n\
         A new complaint has been registered.\n\
         \n\
         Complaint ID: {id}\n\
         Category: {category}\n\
         Subcategory: {subcategory}\n\
         Urgency: {urgency}\n\
         Assigned Department: {assigned_to}\n\
         ETA for Resolution: {eta}\n\
         Submitted At: {submitted_at}\n\
         \n\
         Complaint text:\n\
         \"{text}\"\n\
         \n\
         Please take the necessary action and update the system once resolved.\n",
        recipient = recipient_name(&complaint.assigned_to),
        id = complaint.complaint_id,
        category = complaint.category,
        subcategory = complaint.subcategory,
        urgency = complaint.urgency,
        assigned_to = complaint.assigned_to,
        eta = eta_message,
        submitted_at = complaint.created_at.format("%d-%m-%Y %H:%M UTC"),
        text = complaint.user_input,
    );

    (subject, body)
}

/// Derive a salutation from the local part of an address:
/// `billing.team@example.com` -> `Billing Team`.
fn recipient_name(address: &str) -> String {
    let local = address.split('@').next().unwrap_or(address);
    local
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
