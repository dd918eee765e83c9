//! Model configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// Raw model selection from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Registry id (or API name) of the model selected at startup
    pub default: Option<String>,
    /// Whether the extended-reasoning budget is enabled for models that support it
    pub thinking_budget: bool,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            default: None,
            thinking_budget: true,
        }
    }
}
