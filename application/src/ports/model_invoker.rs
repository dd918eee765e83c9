//! Model invoker port
//!
//! Defines the interface for sending one prompt to a language model.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a model invocation
///
/// The variant is the structured error kind; callers never need to inspect
/// the message text to classify a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("API key not valid: {0}")]
    InvalidCredentials(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Whether this failure means the configured credentials cannot be used
    pub fn is_credential_error(&self) -> bool {
        matches!(self, GatewayError::InvalidCredentials(_))
    }
}

/// Inline image sent along with a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub base64_data: String,
}

/// One invocation of the model
#[derive(Debug, Clone, Copy)]
pub struct InvocationRequest<'a> {
    pub prompt: &'a str,
    /// Provider-side model name
    pub model: &'a str,
    /// Role header, sent as the system instruction
    pub role_header: &'a str,
    pub disable_extended_reasoning: bool,
    pub image: Option<&'a InlineImage>,
}

/// Text generated by a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub elapsed: Duration,
}

impl Generation {
    pub fn new(text: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            text: text.into(),
            elapsed,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Gateway to a language model provider
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Generate text for a prompt
    async fn invoke(&self, request: InvocationRequest<'_>) -> Result<Generation, GatewayError>;

    /// Whether credentials are configured at all.
    ///
    /// Checked once when a session starts; invalid credentials are only
    /// discovered through [`GatewayError::InvalidCredentials`].
    fn credentials_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_classification() {
        assert!(GatewayError::InvalidCredentials("bad key".to_string()).is_credential_error());
        assert!(!GatewayError::RequestFailed("API key not valid".to_string()).is_credential_error());
        assert!(!GatewayError::Timeout.is_credential_error());
    }

    #[test]
    fn test_generation_elapsed_ms() {
        let generation = Generation::new("hi", Duration::from_millis(1500));
        assert_eq!(generation.elapsed_ms(), 1500);
    }
}
