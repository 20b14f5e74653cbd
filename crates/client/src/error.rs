//! Client-side failure model.
//!
//! Exactly two failure kinds exist: the server rejected the request
//! (non-2xx, possibly with an `error` string in the body), or the
//! request/response never completed cleanly (network or parse failure).
//! Both resolve to a single user-visible message; nothing propagates
//! past the controller that made the call.

/// Errors from gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status code.
    #[error("Request rejected ({status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The server's `error` field, when the body carried one.
        message: Option<String>,
    },

    /// The HTTP request or JSON decoding failed (network, DNS, TLS,
    /// malformed body, ...).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// The message to surface in the alert banner.
    ///
    /// Server-supplied errors are shown verbatim; a rejection without a
    /// message falls back to the call site's generic string; transport
    /// failures render the underlying error.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Rejected { message: None, .. } => fallback.to_string(),
            ClientError::Transport(e) => format!("Error: {e}"),
        }
    }
}
