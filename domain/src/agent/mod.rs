//! Agent domain module
//!
//! The logical and creative discussion roles, and the personas
//! (name + role header) that represent them in prompts and messages.

pub mod role;

pub use role::{AgentProfile, AgentRole, AgentRoster};
