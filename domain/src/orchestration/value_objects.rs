//! Orchestration value objects - immutable result types for a discussion.

use crate::agent::AgentRole;
use serde::{Deserialize, Serialize};

/// Record of one completed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub speaker: AgentRole,
    pub spoken_text: String,
    /// Whether the turn rewrote the notepad
    pub notepad_updated: bool,
    pub elapsed_ms: u64,
}

/// Result of a discussion that reached its synthesis turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionOutcome {
    /// The final answer addressed to the user
    pub answer: String,
    /// All turns in invocation order, synthesis last
    pub turns: Vec<TurnRecord>,
    /// Notepad content after the last turn
    pub notepad: String,
    /// Wall time of the whole query
    pub total_elapsed_ms: u64,
}

impl DiscussionOutcome {
    /// Number of turns that rewrote the notepad
    pub fn notepad_updates(&self) -> usize {
        self.turns.iter().filter(|t| t.notepad_updated).count()
    }
}
