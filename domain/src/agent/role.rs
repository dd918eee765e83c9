//! The two discussion roles and their personas

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the two fixed discussion roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Opens the discussion and writes the final answer
    Logical,
    /// Responds to the logical agent with creative input
    Creative,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Logical => "logical",
            AgentRole::Creative => "creative",
        }
    }

    /// The role on the other side of the discussion
    pub fn opponent(&self) -> AgentRole {
        match self {
            AgentRole::Logical => AgentRole::Creative,
            AgentRole::Creative => AgentRole::Logical,
        }
    }

    /// Short description used when one agent is introduced to the other
    pub fn description(&self) -> &'static str {
        match self {
            AgentRole::Logical => "a logical AI",
            AgentRole::Creative => "a creative AI",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display name and system framing text for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: AgentRole,
    pub name: String,
    /// Role header prepended to every prompt and sent as the system instruction
    pub header: String,
}

impl AgentProfile {
    pub fn new(
        role: AgentRole,
        name: impl Into<String>,
        header: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyAgentName);
        }
        Ok(Self {
            role,
            name,
            header: header.into(),
        })
    }

    pub fn default_logical() -> Self {
        Self {
            role: AgentRole::Logical,
            name: "Cognito".to_string(),
            header: "You are Cognito, a highly logical AI.".to_string(),
        }
    }

    pub fn default_creative() -> Self {
        Self {
            role: AgentRole::Creative,
            name: "Muse".to_string(),
            header: "You are Muse, a highly creative AI.".to_string(),
        }
    }
}

/// Both personas taking part in a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRoster {
    pub logical: AgentProfile,
    pub creative: AgentProfile,
}

impl AgentRoster {
    pub fn new(logical: AgentProfile, creative: AgentProfile) -> Self {
        Self { logical, creative }
    }

    pub fn profile(&self, role: AgentRole) -> &AgentProfile {
        match role {
            AgentRole::Logical => &self.logical,
            AgentRole::Creative => &self.creative,
        }
    }

    pub fn name(&self, role: AgentRole) -> &str {
        &self.profile(role).name
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self {
            logical: AgentProfile::default_logical(),
            creative: AgentProfile::default_creative(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_symmetric() {
        assert_eq!(AgentRole::Logical.opponent(), AgentRole::Creative);
        assert_eq!(AgentRole::Creative.opponent().opponent(), AgentRole::Creative);
    }

    #[test]
    fn test_default_roster() {
        let roster = AgentRoster::default();
        assert_eq!(roster.name(AgentRole::Logical), "Cognito");
        assert_eq!(roster.name(AgentRole::Creative), "Muse");
        assert!(roster.profile(AgentRole::Creative).header.contains("creative"));
    }

    #[test]
    fn test_profile_rejects_blank_name() {
        let result = AgentProfile::new(AgentRole::Logical, "  ", "header");
        assert_eq!(result, Err(DomainError::EmptyAgentName));
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&AgentRole::Creative).unwrap();
        assert_eq!(json, "\"creative\"");
    }
}
