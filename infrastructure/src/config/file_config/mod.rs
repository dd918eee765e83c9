//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod discussion;
mod gemini;
mod logging;
mod model;
mod output;
mod repl;

pub use agents::{FileAgentProfile, FileAgentsConfig};
pub use discussion::FileDiscussionConfig;
pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use duet_application::DiscussionConfig;
use duet_domain::{AgentRole, ModelRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("discussion.exchanges must be at least 1")]
    ZeroExchanges,

    #[error("gemini.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("agents.{0}.name cannot be empty")]
    EmptyAgentName(&'static str),

    #[error("model.default: unknown model '{0}'")]
    UnknownModel(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Turn schedule and response language
    pub discussion: FileDiscussionConfig,
    /// Default model and extended-reasoning budget
    pub model: FileModelConfig,
    /// Agent personas
    pub agents: FileAgentsConfig,
    /// Gemini API connection
    pub gemini: FileGeminiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration against the given model registry.
    pub fn validate(&self, registry: &ModelRegistry) -> Result<(), ConfigValidationError> {
        if self.discussion.exchanges == 0 {
            return Err(ConfigValidationError::ZeroExchanges);
        }
        if self.gemini.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        for role in [AgentRole::Logical, AgentRole::Creative] {
            if self.agents.profile(role).has_empty_name() {
                return Err(ConfigValidationError::EmptyAgentName(role.as_str()));
            }
        }
        if let Some(id) = &self.model.default
            && registry.find(id).is_none()
        {
            return Err(ConfigValidationError::UnknownModel(id.clone()));
        }
        Ok(())
    }

    /// Build the discussion parameters from the validated configuration.
    pub fn to_discussion_config(&self) -> Result<DiscussionConfig, ConfigValidationError> {
        let roster = self.agents.to_roster()?;
        let mut config = DiscussionConfig::default()
            .with_exchanges(self.discussion.exchanges)
            .with_roster(roster);
        if let Some(language) = self.discussion.response_language() {
            config = config.with_response_language(language);
        }
        if let Some(notepad) = &self.discussion.initial_notepad {
            config = config.with_initial_notepad(notepad.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_domain::{DEFAULT_EXCHANGES, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[discussion]
exchanges = 3
response_language = "French"

[model]
default = "pro"
thinking_budget = false

[agents.logical]
name = "Ada"

[agents.creative]
name = "Iris"
header = "You are Iris, a dreamy and imaginative AI."

[gemini]
api_key_env = "MY_GEMINI_KEY"
timeout_seconds = 30

[output]
format = "discussion"
color = false

[logging]
conversation_log = "/tmp/duet.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discussion.exchanges, 3);
        assert_eq!(config.model.default.as_deref(), Some("pro"));
        assert!(!config.model.thinking_budget);
        assert_eq!(config.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.gemini.timeout_seconds, 30);
        assert_eq!(config.output.format, Some(OutputFormat::Discussion));
        assert!(!config.output.color);
        assert!(config.logging.conversation_log.is_some());
        assert!(config.validate(&ModelRegistry::builtin()).is_ok());

        let discussion = config.to_discussion_config().unwrap();
        assert_eq!(discussion.exchanges, 3);
        assert_eq!(discussion.response_language.as_deref(), Some("French"));
        assert_eq!(discussion.roster.logical.name, "Ada");
        assert_eq!(
            discussion.roster.logical.header,
            "You are Ada, a highly logical AI."
        );
        assert_eq!(
            discussion.roster.creative.header,
            "You are Iris, a dreamy and imaginative AI."
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.discussion.exchanges, DEFAULT_EXCHANGES);
        assert!(config.model.default.is_none());
        assert!(config.model.thinking_budget);
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.validate(&ModelRegistry::builtin()).is_ok());

        let discussion = config.to_discussion_config().unwrap();
        assert_eq!(discussion, DiscussionConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let registry = ModelRegistry::builtin();

        let mut config = FileConfig::default();
        config.discussion.exchanges = 0;
        assert_eq!(
            config.validate(&registry),
            Err(ConfigValidationError::ZeroExchanges)
        );

        let mut config = FileConfig::default();
        config.gemini.timeout_seconds = 0;
        assert_eq!(
            config.validate(&registry),
            Err(ConfigValidationError::InvalidTimeout)
        );

        let mut config = FileConfig::default();
        config.agents.creative.name = Some("  ".to_string());
        assert_eq!(
            config.validate(&registry),
            Err(ConfigValidationError::EmptyAgentName("creative"))
        );

        let mut config = FileConfig::default();
        config.model.default = Some("gpt-9".to_string());
        assert_eq!(
            config.validate(&registry),
            Err(ConfigValidationError::UnknownModel("gpt-9".to_string()))
        );
    }
}
