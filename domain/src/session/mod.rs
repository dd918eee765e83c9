//! Chat session domain.
//!
//! - [`message::Message`]: an immutable utterance with sender and purpose
//! - [`transcript::DiscussionTranscript`]: agent-to-agent lines used in prompts
//! - [`state::SessionState`]: messages, notepad and session flags

pub mod message;
pub mod state;
pub mod transcript;

pub use message::{ImageAttachment, Message, MessagePurpose, NoticeKind, Sender};
pub use state::SessionState;
pub use transcript::{DiscussionTranscript, TranscriptLine};
