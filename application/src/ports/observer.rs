//! Discussion observer port
//!
//! Lets the presentation layer follow a discussion as it happens.

use duet_domain::{DiscussionPhase, Message, Notepad};

/// Callbacks fired at turn boundaries
///
/// Implementations live in the presentation layer.
pub trait DiscussionObserver: Send + Sync {
    /// Called after any message is appended to the session
    fn on_message(&self, message: &Message);

    /// Called right before a model invocation
    fn on_turn_start(&self, _phase: &DiscussionPhase, _speaker: &str) {}

    /// Called after a turn rewrote the notepad
    fn on_notepad_updated(&self, _notepad: &Notepad) {}

    /// Called once when the discussion ends, successfully or not
    fn on_discussion_end(&self, _success: bool) {}
}

/// No-op observer for when nobody is watching
pub struct NoObserver;

impl DiscussionObserver for NoObserver {
    fn on_message(&self, _message: &Message) {}
}
