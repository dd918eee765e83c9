//! Presentation-level configuration

use std::path::PathBuf;

/// REPL behavior, resolved from the `[repl]` section and CLI flags
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show the progress bar and echo turns as they land
    pub show_progress: bool,
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// The configured history file, or `$XDG_DATA_HOME/duet/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("duet").join("history.txt")))
    }
}
