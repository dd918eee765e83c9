//! Model descriptors and the fixed model registry

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A selectable language model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Short identifier used on the command line and in config files
    pub id: String,
    /// User-friendly name for display
    pub name: String,
    /// Model name sent to the provider API
    pub api_name: String,
    /// Whether the "disable extended reasoning" toggle applies to this model
    pub supports_thinking_budget: bool,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_name: impl Into<String>,
        supports_thinking_budget: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            api_name: api_name.into(),
            supports_thinking_budget,
        }
    }

    /// Whether a request should ask the provider to skip extended reasoning.
    ///
    /// Only models that support a thinking budget can have it disabled.
    pub fn disables_extended_reasoning(&self, budget_enabled: bool) -> bool {
        self.supports_thinking_budget && !budget_enabled
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered list of selectable models. The first entry is the default.
///
/// Deserialization goes through [`ModelRegistry::new`], so an empty list is
/// rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawModelRegistry")]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

#[derive(Deserialize)]
struct RawModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl TryFrom<RawModelRegistry> for ModelRegistry {
    type Error = DomainError;

    fn try_from(raw: RawModelRegistry) -> Result<Self, Self::Error> {
        Self::new(raw.models)
    }
}

impl ModelRegistry {
    /// Build a registry from an ordered list of models.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self, DomainError> {
        if models.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }
        Ok(Self { models })
    }

    /// The built-in Gemini models.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelDescriptor::new(
                    "flash",
                    "Gemini 2.5 Flash",
                    "gemini-2.5-flash",
                    true,
                ),
                ModelDescriptor::new("pro", "Gemini 2.5 Pro", "gemini-2.5-pro", false),
            ],
        }
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// The default selection (first entry)
    pub fn default_model(&self) -> &ModelDescriptor {
        // Constructors guarantee at least one entry
        &self.models[0]
    }

    /// Look a model up by its short id or its API name.
    pub fn find(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .or_else(|| self.models.iter().find(|m| m.api_name == id))
    }

    pub fn resolve(&self, id: &str) -> Result<&ModelDescriptor, DomainError> {
        self.find(id)
            .ok_or_else(|| DomainError::UnknownModel(id.to_string()))
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
