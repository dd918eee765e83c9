//! Session state exposed to the presentation layer

use super::message::Message;
use crate::agent::AgentRole;
use crate::notepad::Notepad;
use serde::{Deserialize, Serialize};

/// Everything one chat session knows (Aggregate)
///
/// Messages are append-only. The notepad is written only through
/// [`SessionState::apply_notepad_update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    messages: Vec<Message>,
    notepad: Notepad,
    credentials_valid: bool,
    is_busy: bool,
}

impl SessionState {
    pub fn new(initial_notepad: impl Into<String>, credentials_valid: bool) -> Self {
        Self {
            messages: Vec::new(),
            notepad: Notepad::new(initial_notepad),
            credentials_valid,
            is_busy: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn notepad(&self) -> &Notepad {
        &self.notepad
    }

    pub fn credentials_valid(&self) -> bool {
        self.credentials_valid
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Overwrite the notepad if `update` is present. Returns whether it was written.
    pub fn apply_notepad_update(&mut self, update: Option<&str>, by: AgentRole) -> bool {
        self.notepad.apply(update, by)
    }

    /// Mark credentials invalid for the rest of the session.
    pub fn invalidate_credentials(&mut self) {
        self.credentials_valid = false;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.is_busy = busy;
    }

    /// Drop all messages and restore the notepad template.
    ///
    /// The credential flag survives a reset; it is only cleared externally.
    /// The busy flag is left alone: whoever set it clears it.
    pub fn reset(&mut self, initial_notepad: impl Into<String>) {
        self.messages.clear();
        self.notepad = Notepad::new(initial_notepad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::NoticeKind;

    #[test]
    fn test_new_state() {
        let state = SessionState::new("template", true);
        assert!(state.messages().is_empty());
        assert_eq!(state.notepad().content(), "template");
        assert!(state.credentials_valid());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_reset_keeps_session_flags() {
        let mut state = SessionState::new("template", true);
        state.push_message(Message::system(NoticeKind::Welcome, "hi"));
        state.apply_notepad_update(Some("notes"), AgentRole::Logical);
        state.invalidate_credentials();
        state.set_busy(true);

        state.reset("template");

        assert!(state.messages().is_empty());
        assert_eq!(state.notepad().content(), "template");
        assert_eq!(state.notepad().last_updated_by(), None);
        assert!(!state.credentials_valid());
        assert!(state.is_busy());
    }

    #[test]
    fn test_apply_notepad_update() {
        let mut state = SessionState::new("template", true);
        assert!(!state.apply_notepad_update(None, AgentRole::Creative));
        assert_eq!(state.notepad().content(), "template");
        assert!(state.apply_notepad_update(Some("v2"), AgentRole::Creative));
        assert_eq!(state.notepad().content(), "v2");
        assert_eq!(state.notepad().last_updated_by(), Some(AgentRole::Creative));
    }
}
