//! Discussion parameters for the use case loop.

use duet_domain::{AgentRoster, DEFAULT_EXCHANGES, INITIAL_NOTEPAD_CONTENT};
use serde::{Deserialize, Serialize};

/// Static parameters of every discussion in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionConfig {
    /// Number of creative/logical reply pairs after the opening statement
    pub exchanges: usize,
    /// Optional language every agent is asked to respond in
    pub response_language: Option<String>,
    /// Names and role headers of both agents
    pub roster: AgentRoster,
    /// Notepad content at session start and after a reset
    pub initial_notepad: String,
}

impl Default for DiscussionConfig {
    fn default() -> Self {
        Self {
            exchanges: DEFAULT_EXCHANGES,
            response_language: None,
            roster: AgentRoster::default(),
            initial_notepad: INITIAL_NOTEPAD_CONTENT.to_string(),
        }
    }
}

impl DiscussionConfig {
    // ==================== Builder Methods ====================

    pub fn with_exchanges(mut self, exchanges: usize) -> Self {
        self.exchanges = exchanges;
        self
    }

    pub fn with_response_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = Some(language.into());
        self
    }

    pub fn with_roster(mut self, roster: AgentRoster) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_initial_notepad(mut self, content: impl Into<String>) -> Self {
        self.initial_notepad = content.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscussionConfig::default();
        assert_eq!(config.exchanges, 2);
        assert!(config.response_language.is_none());
        assert_eq!(config.initial_notepad, INITIAL_NOTEPAD_CONTENT);
    }

    #[test]
    fn test_builders() {
        let config = DiscussionConfig::default()
            .with_exchanges(3)
            .with_response_language("Chinese")
            .with_initial_notepad("blank");
        assert_eq!(config.exchanges, 3);
        assert_eq!(config.response_language.as_deref(), Some("Chinese"));
        assert_eq!(config.initial_notepad, "blank");
    }
}
