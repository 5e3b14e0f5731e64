use thiserror::Error;

/// The only failure kind the dispatcher surfaces: the service could not be
/// reached, answered outside 2xx, or returned a body that did not decode.
/// Callers convert it to a flow-specific fallback; it is never escalated.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("service responded with HTTP {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed service response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl TransportError {
    /// True when the failure happened before any response arrived.
    pub fn is_unreachable(&self) -> bool {
        match self {
            TransportError::Request(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }
}
