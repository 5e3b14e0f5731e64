use serde::{Deserialize, Serialize};

/// Decision payload returned by the entrance endpoint.
///
/// The service's shape is not contractually guaranteed, so every field is
/// optional and decoded verbatim; rendering degrades to empty text when a
/// field is absent. Successful scans carry `status`, `plate`, `timestamp`,
/// `analysis` and optionally `factual_data`; a failed plate read instead
/// carries `status = "error"`, `message` and a `decision` hint (`"HOLD"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntranceDecision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factual_data: Option<serde_json::Value>,
}

impl EntranceDecision {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn plate_text(&self) -> &str {
        self.plate.as_deref().unwrap_or("")
    }

    pub fn timestamp_text(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }

    pub fn analysis_text(&self) -> &str {
        self.analysis.as_deref().unwrap_or("")
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Body posted to the chatbot-order endpoint. `session_id` keys per-session
/// conversation history on the service side; absent means the service default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl ServiceHealth {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrance_decision_decodes_with_every_field_absent() {
        let decision: EntranceDecision = serde_json::from_str("{}").expect("decode");
        assert!(!decision.is_success());
        assert_eq!(decision.plate_text(), "");
        assert_eq!(decision.analysis_text(), "");
    }

    #[test]
    fn entrance_decision_ignores_unknown_service_fields() {
        let decision: EntranceDecision = serde_json::from_str(
            r#"{"status":"success","plate":"AB-123-CD","confidence":0.97}"#,
        )
        .expect("decode");
        assert!(decision.is_success());
        assert_eq!(decision.plate_text(), "AB-123-CD");
    }

    #[test]
    fn order_request_omits_absent_session_id() {
        let body = serde_json::to_string(&OrderRequest {
            message: "Commander 50 claviers pour Client Alpha".to_string(),
            session_id: None,
        })
        .expect("encode");
        assert_eq!(body, r#"{"message":"Commander 50 claviers pour Client Alpha"}"#);
    }
}
