//! HTTP dispatcher for the warehouse decision service.
//!
//! A [`GateClient`] performs one outbound call per operation and converts the
//! outcome into a typed result: entrance scans go out as multipart uploads,
//! order messages as JSON, and a health probe checks liveness. Every failure
//! is contained here as a [`TransportError`]; nothing is retried and nothing
//! panics across this boundary. The client holds no flow state — callers
//! apply results to their own state.

pub mod error;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use shared::protocol::{EntranceDecision, OrderReply, OrderRequest, ServiceHealth};
use uuid::Uuid;

pub use error::TransportError;

/// Image bytes plus the metadata describing the multipart `file` part.
#[derive(Debug, Clone)]
pub struct EntranceScanUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct GateClient {
    http: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl GateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_session_id(base_url, Uuid::new_v4().to_string())
    }

    /// Pins the chat session id instead of generating one per process; the
    /// service keys conversation history on it.
    pub fn with_session_id(base_url: impl Into<String>, session_id: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            session_id: session_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Posts the selected image as multipart field `file` and returns the
    /// decoded decision payload verbatim. Business fields are not validated
    /// here; the render boundary handles absent ones.
    pub async fn process_entrance(
        &self,
        upload: EntranceScanUpload,
    ) -> Result<EntranceDecision, TransportError> {
        tracing::debug!(
            filename = %upload.filename,
            size_bytes = upload.bytes.len(),
            "dispatching entrance scan"
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.mime_type)
            .map_err(TransportError::Request)?;
        let form = Form::new().part("file", part);
        let response = self
            .http
            .post(format!("{}/process-entrance", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Request)?;
        decode_success(response).await
    }

    /// Sends one order-intake message carrying `{"message": text}` plus this
    /// client's session id. The reply's `message` field is the assistant
    /// text; on failure the caller substitutes its own fallback.
    pub async fn submit_order(
        &self,
        message: impl Into<String>,
    ) -> Result<OrderReply, TransportError> {
        let request = OrderRequest {
            message: message.into(),
            session_id: Some(self.session_id.clone()),
        };
        tracing::debug!(session_id = %self.session_id, "dispatching order message");
        let response = self
            .http
            .post(format!("{}/chatbot-order", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(TransportError::Request)?;
        decode_success(response).await
    }

    /// Best-effort liveness probe of the decision service.
    pub async fn health(&self) -> Result<ServiceHealth, TransportError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(TransportError::Request)?;
        decode_success(response).await
    }
}

async fn decode_success<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status { status });
    }
    response.json::<T>().await.map_err(TransportError::Decode)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
