//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model {0} does not support a thinking budget")]
    ThinkingBudgetUnsupported(String),

    #[error("Model registry is empty")]
    EmptyRegistry,

    #[error("Agent name cannot be empty")]
    EmptyAgentName,
}
