use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the decision service attaches to non-2xx responses
/// (`{"detail": "..."}`). The stub emits it; clients treat any non-2xx as a
/// transport failure and do not rely on decoding it.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{detail}")]
pub struct ServiceErrorBody {
    pub detail: String,
}

impl ServiceErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
