//! Configuration file loading for duet
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DUET_*` environment variables (`DUET_GEMINI__TIMEOUT_SECONDS=30`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./duet.toml` or `./.duet.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/duet/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentProfile, FileAgentsConfig, FileConfig, FileDiscussionConfig,
    FileGeminiConfig, FileLoggingConfig, FileModelConfig, FileOutputConfig,
    FileReplConfig,
};
pub use loader::ConfigLoader;
