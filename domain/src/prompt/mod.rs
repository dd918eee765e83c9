//! Prompt domain
//!
//! Builds the exact prompt text for the opening, reply and synthesis turns,
//! threading in the transcript and the live notepad content.

mod template;

pub use template::{PromptRequest, PromptTemplate};
