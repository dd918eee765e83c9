//! Port for structured conversation logging.
//!
//! Records every prompt, turn result and notepad rewrite of a discussion in
//! a machine-readable form. `tracing` covers the human-readable diagnostics.

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "prompt", "turn_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub const DISCUSSION_STARTED: &'static str = "discussion_started";
    pub const PROMPT: &'static str = "prompt";
    pub const TURN_COMPLETED: &'static str = "turn_completed";
    pub const NOTEPAD_UPDATED: &'static str = "notepad_updated";
    pub const DISCUSSION_FAILED: &'static str = "discussion_failed";
    pub const DISCUSSION_COMPLETED: &'static str = "discussion_completed";

    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; a failed write must never stop a
/// discussion.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when conversation logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
