//! Discussion configuration from TOML (`[discussion]` section)

use duet_domain::DEFAULT_EXCHANGES;
use serde::{Deserialize, Serialize};

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Number of creative/logical reply pairs after the opening statement
    pub exchanges: usize,
    /// Language every agent is asked to respond in
    pub response_language: Option<String>,
    /// Replaces the built-in notepad template
    pub initial_notepad: Option<String>,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            exchanges: DEFAULT_EXCHANGES,
            response_language: None,
            initial_notepad: None,
        }
    }
}

impl FileDiscussionConfig {
    /// The response language, ignoring blank values
    pub fn response_language(&self) -> Option<&str> {
        self.response_language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_language_is_ignored() {
        let config = FileDiscussionConfig {
            response_language: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.response_language(), None);
    }
}
