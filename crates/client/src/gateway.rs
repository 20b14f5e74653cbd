//! Backend gateway: the trait the controllers call, and its HTTP
//! implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::types::{
    ActionReply, AdminComplaintRow, KeyGrant, Prediction, StatusReport, SubmitReceipt,
    SubmitRequest, UpdateRequest,
};

/// One method per backend endpoint the page controllers use.
#[async_trait]
pub trait ComplaintGateway: Send + Sync {
    async fn predict(&self, complaint_text: &str) -> Result<Prediction, ClientError>;
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitReceipt, ClientError>;
    async fn get_status(&self, complaint_id: &str) -> Result<StatusReport, ClientError>;
    async fn verify_key(&self, key: &str) -> Result<KeyGrant, ClientError>;
    async fn all_complaints(&self) -> Result<Vec<AdminComplaintRow>, ClientError>;
    async fn update_complaint(&self, request: &UpdateRequest) -> Result<ActionReply, ClientError>;
    async fn delete_complaint(
        &self,
        complaint_id: &str,
        modify_key: &str,
    ) -> Result<ActionReply, ClientError>;
}

#[async_trait]
impl<T: ComplaintGateway + ?Sized> ComplaintGateway for Arc<T> {
    async fn predict(&self, complaint_text: &str) -> Result<Prediction, ClientError> {
        (**self).predict(complaint_text).await
    }
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitReceipt, ClientError> {
        (**self).submit(request).await
    }
    async fn get_status(&self, complaint_id: &str) -> Result<StatusReport, ClientError> {
        (**self).get_status(complaint_id).await
    }
    async fn verify_key(&self, key: &str) -> Result<KeyGrant, ClientError> {
        (**self).verify_key(key).await
    }
    async fn all_complaints(&self) -> Result<Vec<AdminComplaintRow>, ClientError> {
        (**self).all_complaints().await
    }
    async fn update_complaint(&self, request: &UpdateRequest) -> Result<ActionReply, ClientError> {
        (**self).update_complaint(request).await
    }
    async fn delete_complaint(
        &self,
        complaint_id: &str,
        modify_key: &str,
    ) -> Result<ActionReply, ClientError> {
        (**self).delete_complaint(complaint_id, modify_key).await
    }
}

// ---------------------------------------------------------------------------
// HttpGateway
// ---------------------------------------------------------------------------

/// Shape of backend error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP gateway for a complaint box backend.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given base URL, e.g. `http://host:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a gateway reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across controllers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Decode a 2xx body as `T`; turn anything else into
    /// [`ClientError::Rejected`] carrying the server's `error` string
    /// when the body has one.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.error);
        tracing::debug!(status = status.as_u16(), ?message, "Request rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ComplaintGateway for HttpGateway {
    async fn predict(&self, complaint_text: &str) -> Result<Prediction, ClientError> {
        self.post_json(
            "/predict",
            &serde_json::json!({ "complaint_text": complaint_text }),
        )
        .await
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitReceipt, ClientError> {
        let body = serde_json::to_value(request).expect("SubmitRequest serializes");
        self.post_json("/submit", &body).await
    }

    async fn get_status(&self, complaint_id: &str) -> Result<StatusReport, ClientError> {
        self.get_json(&format!("/get_status/{complaint_id}")).await
    }

    async fn verify_key(&self, key: &str) -> Result<KeyGrant, ClientError> {
        self.post_json("/verify_key", &serde_json::json!({ "key": key }))
            .await
    }

    async fn all_complaints(&self) -> Result<Vec<AdminComplaintRow>, ClientError> {
        self.get_json("/all_complaints").await
    }

    async fn update_complaint(&self, request: &UpdateRequest) -> Result<ActionReply, ClientError> {
        let body = serde_json::to_value(request).expect("UpdateRequest serializes");
        self.post_json("/update_complaint", &body).await
    }

    async fn delete_complaint(
        &self,
        complaint_id: &str,
        modify_key: &str,
    ) -> Result<ActionReply, ClientError> {
        self.post_json(
            "/delete_complaint",
            &serde_json::json!({ "complaint_id": complaint_id, "modify_key": modify_key }),
        )
        .await
    }
}
