//! Reducer-style transitions over the shared dashboard state.
//!
//! Rendering only reads this state; every mutation goes through one of the
//! transition functions below so both request flows stay auditable without
//! a UI attached.

use std::path::PathBuf;

use shared::domain::{ChatMessage, StockItem, ASSISTANT_FALLBACK_REPLY};
use shared::protocol::EntranceDecision;

#[derive(Debug, Clone, Default)]
pub struct CaptureState {
    /// Last selected capture, kept for preview. Never cleared automatically.
    pub image_ref: Option<PathBuf>,
    /// True exactly while an entrance request is outstanding.
    pub is_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceIndicator {
    #[default]
    Probing,
    Online,
    Offline,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub capture: CaptureState,
    pub decision: Option<EntranceDecision>,
    pub conversation: Vec<ChatMessage>,
    pub draft: String,
    /// True while a submitted order turn waits for its assistant reply.
    pub awaiting_assistant: bool,
    pub service: ServiceIndicator,
    pub model_loaded: bool,
    pub stock: Vec<StockItem>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            capture: CaptureState::default(),
            decision: None,
            conversation: Vec::new(),
            draft: String::new(),
            awaiting_assistant: false,
            service: ServiceIndicator::Probing,
            model_loaded: false,
            stock: default_stock_items(),
        }
    }
}

fn default_stock_items() -> Vec<StockItem> {
    vec![
        StockItem::new("Laptops", 5, 10),
        StockItem::new("Paper A4", 200, 50),
        StockItem::new("Printer Ink", 15, 20),
    ]
}

/// Records the selected capture and marks the scan pending. Returns false
/// without touching state when a scan is already outstanding; the caller
/// must not dispatch in that case.
pub fn begin_entrance_scan(state: &mut DashboardState, image_path: PathBuf) -> bool {
    if state.capture.is_pending {
        return false;
    }
    state.capture.image_ref = Some(image_path);
    state.capture.is_pending = true;
    true
}

/// Replaces the displayed decision wholesale with the latest payload.
pub fn settle_entrance_success(state: &mut DashboardState, decision: EntranceDecision) {
    state.capture.is_pending = false;
    state.decision = Some(decision);
}

/// Ends the pending state. The previously displayed decision, if any,
/// stays on screen.
pub fn settle_entrance_failure(state: &mut DashboardState) {
    state.capture.is_pending = false;
}

/// Appends the user turn and clears the draft in one synchronous step,
/// before any network work starts. Returns the text to dispatch, or `None`
/// when the draft is blank or the previous turn has not settled yet.
pub fn take_submittable_draft(state: &mut DashboardState) -> Option<String> {
    if state.awaiting_assistant || state.draft.trim().is_empty() {
        return None;
    }
    let text = std::mem::take(&mut state.draft);
    state.conversation.push(ChatMessage::user(text.clone()));
    state.awaiting_assistant = true;
    Some(text)
}

/// Rolls back an order turn whose command never reached the backend queue:
/// the optimistic user message is removed and the draft restored, so the log
/// keeps its strict user/assistant alternation.
pub fn abort_order_turn(state: &mut DashboardState, draft: String) {
    state.conversation.pop();
    state.draft = draft;
    state.awaiting_assistant = false;
}

/// Closes the open order turn with exactly one assistant message. `reply`
/// is `None` when the transport failed, in which case the fixed fallback
/// text stands in for the assistant.
pub fn settle_order_turn(state: &mut DashboardState, reply: Option<String>) {
    let text = reply.unwrap_or_else(|| ASSISTANT_FALLBACK_REPLY.to_string());
    state.conversation.push(ChatMessage::assistant(text));
    state.awaiting_assistant = false;
}

pub fn record_health(state: &mut DashboardState, online: bool, model_loaded: bool) {
    state.service = if online {
        ServiceIndicator::Online
    } else {
        ServiceIndicator::Offline
    };
    state.model_loaded = model_loaded;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use shared::domain::{ChatRole, StockStatus};

    use super::*;

    fn granted(plate: &str) -> EntranceDecision {
        EntranceDecision {
            status: Some("success".to_string()),
            plate: Some(plate.to_string()),
            timestamp: Some("T1".to_string()),
            analysis: Some("OK".to_string()),
            ..EntranceDecision::default()
        }
    }

    #[test]
    fn file_selection_sets_preview_ref_and_pending() {
        let mut state = DashboardState::new();
        assert!(begin_entrance_scan(&mut state, PathBuf::from("a.jpg")));
        assert_eq!(state.capture.image_ref.as_deref(), Some(Path::new("a.jpg")));
        assert!(state.capture.is_pending);
        assert!(state.decision.is_none());
    }

    #[test]
    fn selections_while_a_scan_is_pending_are_ignored() {
        let mut state = DashboardState::new();
        assert!(begin_entrance_scan(&mut state, PathBuf::from("a.jpg")));
        assert!(!begin_entrance_scan(&mut state, PathBuf::from("b.jpg")));
        assert_eq!(state.capture.image_ref.as_deref(), Some(Path::new("a.jpg")));
        assert!(state.capture.is_pending);
    }

    #[test]
    fn successful_scan_clears_pending_and_shows_latest_payload() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_success(&mut state, granted("AB-123-CD"));
        assert!(!state.capture.is_pending);
        let decision = state.decision.as_ref().expect("decision displayed");
        assert_eq!(decision.plate_text(), "AB-123-CD");
        assert_eq!(decision.timestamp_text(), "T1");
        assert_eq!(decision.analysis_text(), "OK");
    }

    #[test]
    fn resubmitting_the_same_file_overwrites_idempotently() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_success(&mut state, granted("AB-123-CD"));
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_success(&mut state, granted("AB-123-CD"));
        assert_eq!(state.decision, Some(granted("AB-123-CD")));
        assert!(!state.capture.is_pending);
    }

    #[test]
    fn replacement_decision_is_not_merged_with_the_previous_one() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_success(
            &mut state,
            EntranceDecision {
                status: Some("error".to_string()),
                message: Some("No license plate detected in the image.".to_string()),
                decision: Some("HOLD".to_string()),
                ..EntranceDecision::default()
            },
        );
        begin_entrance_scan(&mut state, PathBuf::from("b.jpg"));
        settle_entrance_success(&mut state, granted("AB-123-CD"));

        let decision = state.decision.expect("decision displayed");
        assert!(decision.is_success());
        assert!(decision.message.is_none());
        assert!(decision.decision.is_none());
    }

    #[test]
    fn failed_scan_clears_pending_and_keeps_prior_decision() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_success(&mut state, granted("AB-123-CD"));
        begin_entrance_scan(&mut state, PathBuf::from("b.jpg"));
        settle_entrance_failure(&mut state);
        assert!(!state.capture.is_pending);
        assert_eq!(state.decision, Some(granted("AB-123-CD")));
    }

    #[test]
    fn failed_scan_with_no_prior_decision_displays_nothing() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));
        settle_entrance_failure(&mut state);
        assert!(!state.capture.is_pending);
        assert!(state.decision.is_none());
        assert!(state.capture.image_ref.is_some());
    }

    #[test]
    fn order_submission_appends_user_turn_and_clears_draft() {
        let mut state = DashboardState::new();
        state.draft = "Commander 50 claviers pour Client Alpha".to_string();
        let text = take_submittable_draft(&mut state).expect("dispatchable");
        assert_eq!(text, "Commander 50 claviers pour Client Alpha");
        assert!(state.draft.is_empty());
        assert_eq!(state.conversation.len(), 1);
        assert_eq!(state.conversation[0].role, ChatRole::User);
        assert!(state.awaiting_assistant);
    }

    #[test]
    fn settled_order_turn_grows_log_by_exactly_two() {
        let mut state = DashboardState::new();
        state.draft = "Commander 50 claviers pour Client Alpha".to_string();
        take_submittable_draft(&mut state);
        settle_order_turn(&mut state, Some("Order placed.".to_string()));

        assert_eq!(state.conversation.len(), 2);
        assert_eq!(state.conversation[0].role, ChatRole::User);
        assert_eq!(
            state.conversation[0].text,
            "Commander 50 claviers pour Client Alpha"
        );
        assert_eq!(state.conversation[1].role, ChatRole::Assistant);
        assert_eq!(state.conversation[1].text, "Order placed.");
        assert!(!state.awaiting_assistant);
    }

    #[test]
    fn aborted_turn_restores_draft_and_log() {
        let mut state = DashboardState::new();
        state.draft = "Commander 50 claviers".to_string();
        let text = take_submittable_draft(&mut state).expect("dispatchable");
        abort_order_turn(&mut state, text);

        assert!(state.conversation.is_empty());
        assert_eq!(state.draft, "Commander 50 claviers");
        assert!(!state.awaiting_assistant);
    }

    #[test]
    fn blank_drafts_are_silently_ignored() {
        let mut state = DashboardState::new();
        for draft in ["", "   ", "\n\t "] {
            state.draft = draft.to_string();
            assert!(take_submittable_draft(&mut state).is_none());
            assert!(state.conversation.is_empty());
            assert_eq!(state.draft, draft);
        }
    }

    #[test]
    fn surrounding_whitespace_is_preserved_in_the_sent_text() {
        let mut state = DashboardState::new();
        state.draft = "  Commander 50 claviers  ".to_string();
        let text = take_submittable_draft(&mut state).expect("dispatchable");
        assert_eq!(text, "  Commander 50 claviers  ");
        assert_eq!(state.conversation[0].text, "  Commander 50 claviers  ");
    }

    #[test]
    fn transport_failure_appends_the_exact_fallback_reply() {
        let mut state = DashboardState::new();
        state.draft = "Commander 50 claviers pour Client Alpha".to_string();
        take_submittable_draft(&mut state);
        settle_order_turn(&mut state, None);

        assert_eq!(state.conversation.len(), 2);
        assert_eq!(state.conversation[1].role, ChatRole::Assistant);
        assert_eq!(
            state.conversation[1].text,
            "Error connecting to AI assistant."
        );
    }

    #[test]
    fn submissions_while_a_turn_is_open_are_ignored() {
        let mut state = DashboardState::new();
        state.draft = "first order".to_string();
        take_submittable_draft(&mut state).expect("dispatchable");

        state.draft = "second order".to_string();
        assert!(take_submittable_draft(&mut state).is_none());
        assert_eq!(state.draft, "second order");
        assert_eq!(state.conversation.len(), 1);

        settle_order_turn(&mut state, Some("Order placed.".to_string()));
        let text = take_submittable_draft(&mut state).expect("turn closed");
        assert_eq!(text, "second order");
    }

    #[test]
    fn conversation_strictly_alternates_user_then_assistant() {
        let mut state = DashboardState::new();
        for (request, reply) in [("order one", Some("done")), ("order two", None)] {
            state.draft = request.to_string();
            take_submittable_draft(&mut state);
            settle_order_turn(&mut state, reply.map(str::to_string));
        }
        let roles: Vec<ChatRole> = state.conversation.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant
            ]
        );
    }

    #[test]
    fn chat_stays_usable_while_an_entrance_scan_is_pending() {
        let mut state = DashboardState::new();
        begin_entrance_scan(&mut state, PathBuf::from("a.jpg"));

        state.draft = "Commander 50 claviers pour Client Alpha".to_string();
        let text = take_submittable_draft(&mut state).expect("flows are independent");
        assert_eq!(text, "Commander 50 claviers pour Client Alpha");
        assert!(state.capture.is_pending);
    }

    #[test]
    fn health_probe_flips_the_service_indicator() {
        let mut state = DashboardState::new();
        assert_eq!(state.service, ServiceIndicator::Probing);
        record_health(&mut state, true, true);
        assert_eq!(state.service, ServiceIndicator::Online);
        assert!(state.model_loaded);
        record_health(&mut state, false, false);
        assert_eq!(state.service, ServiceIndicator::Offline);
    }

    #[test]
    fn default_stock_items_carry_expected_statuses() {
        let state = DashboardState::new();
        let statuses: Vec<StockStatus> = state.stock.iter().map(StockItem::status).collect();
        assert_eq!(
            statuses,
            vec![StockStatus::Critical, StockStatus::Healthy, StockStatus::Low]
        );
    }
}
