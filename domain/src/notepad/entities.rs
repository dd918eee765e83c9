//! The shared notepad

use crate::agent::AgentRole;
use serde::{Deserialize, Serialize};

/// Content the notepad holds when a session starts or is cleared.
pub const INITIAL_NOTEPAD_CONTENT: &str = "This is a shared notepad.
Cognito and Muse can use it to record ideas, drafts and key points together.

Guidelines:
- The AI agents update this notepad by including a special instruction in their replies.
- The notepad content is included in every subsequent prompt sent to the agents.

Initial state: blank.";

/// Shared scratch buffer both agents may rewrite (Entity)
///
/// Every update is a full replacement of the content; there is no
/// merging or partial editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notepad {
    content: String,
    last_updated_by: Option<AgentRole>,
}

impl Notepad {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            last_updated_by: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The agent that wrote the current content, if any agent has yet
    pub fn last_updated_by(&self) -> Option<AgentRole> {
        self.last_updated_by
    }

    /// Apply an update parsed from an agent response.
    ///
    /// A present update (including the empty string) overwrites the content
    /// and records `by` as the last writer. An absent update leaves the
    /// notepad untouched. Returns whether the notepad was written.
    pub fn apply(&mut self, update: Option<&str>, by: AgentRole) -> bool {
        match update {
            Some(content) => {
                self.content = content.to_string();
                self.last_updated_by = Some(by);
                true
            }
            None => false,
        }
    }
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new(INITIAL_NOTEPAD_CONTENT)
    }
}
