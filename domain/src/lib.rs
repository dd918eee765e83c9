//! Domain layer for duet
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Discussion
//!
//! A logical agent and a creative agent discuss a single user query:
//! an opening statement, a fixed number of alternating reply pairs, and a
//! final synthesis addressed to the user.
//!
//! ## Notepad
//!
//! A shared scratch buffer either agent may replace in full by ending its
//! reply with a `<notepad_update>` block.

pub mod agent;
pub mod config;
pub mod core;
pub mod notepad;
pub mod orchestration;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use agent::{AgentProfile, AgentRole, AgentRoster};
pub use config::OutputFormat;
pub use self::core::{
    error::DomainError,
    model::{ModelDescriptor, ModelRegistry},
};
pub use notepad::{INITIAL_NOTEPAD_CONTENT, Notepad, ParsedResponse, parse_response};
pub use orchestration::{
    DEFAULT_EXCHANGES, DiscussionOutcome, DiscussionPhase, TurnKind, TurnPlan, TurnRecord,
};
pub use prompt::{PromptRequest, PromptTemplate};
pub use session::{
    DiscussionTranscript, ImageAttachment, Message, MessagePurpose, NoticeKind, Sender,
    SessionState,
};
