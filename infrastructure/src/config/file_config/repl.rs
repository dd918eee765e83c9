//! `[repl]` section for `duet --chat`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Echo each turn and notepad rewrite while the agents talk
    pub show_progress: bool,
    /// Readline history; a leading `~/` is expanded
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    pub fn history_path(&self) -> Option<PathBuf> {
        let raw = self.history_file.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_path_is_taken_verbatim() {
        let config = FileReplConfig {
            history_file: Some("/tmp/duet_history".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/duet_history"))
        );
    }

    #[test]
    fn test_history_path_expands_home() {
        let config = FileReplConfig {
            history_file: Some("~/.duet_history".to_string()),
            ..Default::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.history_path(), Some(home.join(".duet_history")));
        }
    }

    #[test]
    fn test_blank_history_file_is_unset() {
        let config = FileReplConfig {
            history_file: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.history_path(), None);
        assert_eq!(FileReplConfig::default().history_path(), None);
    }
}
