//! Discussion state machine
//!
//! ```text
//! Idle -> Opening -> (Reply[creative] -> Reply[logical]) x exchanges -> Synthesis -> Idle
//!                \______________ any failed invocation ______________/-> Failed -> Idle
//! ```
//!
//! Each transition corresponds to one completed model invocation, so every
//! state can be exercised in isolation.

use crate::agent::AgentRole;
use crate::session::MessagePurpose;
use serde::{Deserialize, Serialize};

/// Number of creative/logical reply pairs after the opening statement
pub const DEFAULT_EXCHANGES: usize = 2;

/// Kind of prompt a turn is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Opening,
    Reply,
    Synthesis,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Opening => "opening",
            TurnKind::Reply => "reply",
            TurnKind::Synthesis => "synthesis",
        }
    }
}

/// What the orchestrator must do in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPlan {
    pub speaker: AgentRole,
    pub kind: TurnKind,
    pub purpose: MessagePurpose,
}

/// Phase of a discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum DiscussionPhase {
    Idle,
    Opening,
    /// `exchange` counts reply pairs from zero
    Reply { speaker: AgentRole, exchange: usize },
    Synthesis,
    Failed,
}

impl DiscussionPhase {
    /// Start a discussion from idle.
    pub fn start() -> Self {
        DiscussionPhase::Opening
    }

    /// The turn to run in this phase, or `None` when no turn is due.
    pub fn turn(&self) -> Option<TurnPlan> {
        match *self {
            DiscussionPhase::Opening => Some(TurnPlan {
                speaker: AgentRole::Logical,
                kind: TurnKind::Opening,
                purpose: MessagePurpose::spoken_by(AgentRole::Logical),
            }),
            DiscussionPhase::Reply { speaker, .. } => Some(TurnPlan {
                speaker,
                kind: TurnKind::Reply,
                purpose: MessagePurpose::spoken_by(speaker),
            }),
            DiscussionPhase::Synthesis => Some(TurnPlan {
                speaker: AgentRole::Logical,
                kind: TurnKind::Synthesis,
                purpose: MessagePurpose::FinalResponse,
            }),
            DiscussionPhase::Idle | DiscussionPhase::Failed => None,
        }
    }

    /// Transition after the current turn completed successfully.
    pub fn advance(&self, exchanges: usize) -> Self {
        match *self {
            DiscussionPhase::Opening if exchanges == 0 => DiscussionPhase::Synthesis,
            DiscussionPhase::Opening => DiscussionPhase::Reply {
                speaker: AgentRole::Creative,
                exchange: 0,
            },
            DiscussionPhase::Reply {
                speaker: AgentRole::Creative,
                exchange,
            } => DiscussionPhase::Reply {
                speaker: AgentRole::Logical,
                exchange,
            },
            DiscussionPhase::Reply {
                speaker: AgentRole::Logical,
                exchange,
            } if exchange + 1 < exchanges => DiscussionPhase::Reply {
                speaker: AgentRole::Creative,
                exchange: exchange + 1,
            },
            DiscussionPhase::Reply { .. } => DiscussionPhase::Synthesis,
            DiscussionPhase::Synthesis | DiscussionPhase::Failed | DiscussionPhase::Idle => {
                DiscussionPhase::Idle
            }
        }
    }

    /// Transition after the current turn failed.
    pub fn fail(&self) -> Self {
        match self {
            DiscussionPhase::Idle => DiscussionPhase::Idle,
            _ => DiscussionPhase::Failed,
        }
    }

    /// Total number of invocations a successful discussion makes
    pub fn total_turns(exchanges: usize) -> usize {
        2 + exchanges * 2
    }
}

impl std::fmt::Display for DiscussionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscussionPhase::Idle => write!(f, "idle"),
            DiscussionPhase::Opening => write!(f, "opening statement"),
            DiscussionPhase::Reply { speaker, exchange } => {
                write!(f, "{} reply (exchange {})", speaker, exchange + 1)
            }
            DiscussionPhase::Synthesis => write!(f, "synthesis"),
            DiscussionPhase::Failed => write!(f, "failed"),
        }
    }
}
