//! Application layer for duet
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DiscussionConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    media::{DisplayLease, ImageUpload, MediaError, MediaPort},
    model_invoker::{
        GatewayError, Generation, InlineImage, InvocationRequest, ModelInvoker,
    },
    observer::{DiscussionObserver, NoObserver},
};
pub use use_cases::chat_session::{ChatSession, SessionError, SessionSettings, Submission};
pub use use_cases::run_discussion::{DiscussionError, RunDiscussionInput, RunDiscussionUseCase};
pub use use_cases::shared::SharedSession;
