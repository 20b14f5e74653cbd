//! Self-clearing alert banner.
//!
//! Each page has one banner element. Showing an alert overwrites
//! whatever was displayed (no queueing, no coalescing), and the banner
//! hides itself four seconds after the last show. Expiry is
//! deadline-based -- visibility is a question asked with a clock, not a
//! background timer.

use std::time::{Duration, Instant};

/// How long an alert stays visible after the last show.
pub const ALERT_TTL: Duration = Duration::from_secs(4);

/// Visual style of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// The currently displayed alert.
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    shown_at: Instant,
}

impl Alert {
    /// Whether the alert is still on screen at the given instant.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < ALERT_TTL
    }
}

/// The per-page banner element.
#[derive(Debug, Default)]
pub struct AlertBanner {
    current: Option<Alert>,
}

impl AlertBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, AlertKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, AlertKind::Error);
    }

    /// Display an alert, replacing any previous one and restarting the
    /// auto-hide deadline.
    pub fn show(&mut self, message: impl Into<String>, kind: AlertKind) {
        self.current = Some(Alert {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// The last alert shown, whether or not it is still visible.
    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    /// Shorthand for the last shown message.
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.message.as_str())
    }

    /// The alert to render at the given instant, if any.
    pub fn visible_at(&self, now: Instant) -> Option<&Alert> {
        self.current.as_ref().filter(|a| a.is_visible_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_is_visible_until_ttl() {
        let mut banner = AlertBanner::new();
        banner.success("Analysis complete!");

        let now = Instant::now();
        assert!(banner.visible_at(now).is_some());
        assert!(banner.visible_at(now + ALERT_TTL + Duration::from_millis(1)).is_none());
    }

    #[test]
    fn showing_overwrites_and_restarts_the_deadline() {
        let mut banner = AlertBanner::new();
        banner.success("first");
        banner.error("second");

        let alert = banner.current().expect("alert shown");
        assert_eq!(alert.message, "second");
        assert_eq!(alert.kind, AlertKind::Error);
    }

    #[test]
    fn empty_banner_shows_nothing() {
        let banner = AlertBanner::new();
        assert!(banner.visible_at(Instant::now()).is_none());
        assert!(banner.message().is_none());
    }
}
