//! Infrastructure layer for duet
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod media;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentsConfig, FileConfig, FileGeminiConfig,
    FileOutputConfig, FileReplConfig,
};
pub use gemini::GeminiInvoker;
pub use logging::JsonlConversationLogger;
pub use media::LocalMediaStore;
