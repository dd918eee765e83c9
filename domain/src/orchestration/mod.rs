//! Orchestration domain
//!
//! - [`phase::DiscussionPhase`]: the fixed-topology turn state machine
//! - [`value_objects::DiscussionOutcome`]: what a finished discussion produced

pub mod phase;
pub mod value_objects;

pub use phase::{DEFAULT_EXCHANGES, DiscussionPhase, TurnKind, TurnPlan};
pub use value_objects::{DiscussionOutcome, TurnRecord};
