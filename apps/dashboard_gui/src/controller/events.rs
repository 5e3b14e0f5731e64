//! UI/backend events and error modeling for the dashboard controller.

use shared::protocol::EntranceDecision;

pub enum UiEvent {
    WorkerReady,
    Info(String),
    EntranceDecisionReady(EntranceDecision),
    EntranceScanFailed(UiError),
    AssistantReplied(String),
    AssistantUnreachable(UiError),
    HealthChecked { online: bool, model_loaded: bool },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    EntranceScan,
    OrderIntake,
}

/// Turns a raw entrance-flow failure into operator-facing banner text.
pub fn describe_entrance_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("connection")
        || lower.contains("timed out")
        || lower.contains("dns")
        || lower.contains("request failed")
    {
        "Decision service unreachable; check the service URL and retry the scan.".to_string()
    } else if lower.contains("failed to read") {
        "Could not read the selected image from disk; pick the file again.".to_string()
    } else {
        format!("Entrance scan error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("unsupported")
            || message_lower.contains("failed to read")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("request failed")
            || message_lower.contains("http")
            || message_lower.contains("malformed")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_status_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::EntranceScan,
            "service responded with HTTP 500 Internal Server Error",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::EntranceScan);
    }

    #[test]
    fn classifies_malformed_payloads_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::OrderIntake,
            "malformed service response: expected value at line 1 column 1",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_unreadable_captures_as_validation() {
        let err = UiError::from_message(
            UiErrorContext::EntranceScan,
            "failed to read capture 'truck.jpg': No such file or directory",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn unknown_messages_stay_unclassified() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "thread pool exhausted");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }

    #[test]
    fn unreachable_service_reads_as_a_connection_hint() {
        let text =
            describe_entrance_failure("request failed: error sending request: connection refused");
        assert!(text.contains("unreachable"), "{text}");
    }

    #[test]
    fn unreadable_file_reads_as_a_disk_hint() {
        let text = describe_entrance_failure("failed to read capture 'a.jpg': permission denied");
        assert!(text.contains("disk"), "{text}");
    }
}
