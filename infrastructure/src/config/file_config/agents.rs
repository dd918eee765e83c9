//! Agent persona configuration from TOML (`[agents.*]` sections)

use super::ConfigValidationError;
use duet_domain::{AgentProfile, AgentRole, AgentRoster};
use serde::{Deserialize, Serialize};

/// One agent's persona; unset fields fall back to the built-in persona
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentProfile {
    pub name: Option<String>,
    /// Role header opening every prompt of this agent
    pub header: Option<String>,
}

impl FileAgentProfile {
    pub(super) fn has_empty_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| n.trim().is_empty())
    }

    fn to_profile(&self, role: AgentRole) -> Result<AgentProfile, ConfigValidationError> {
        let builtin = match role {
            AgentRole::Logical => AgentProfile::default_logical(),
            AgentRole::Creative => AgentProfile::default_creative(),
        };
        let name = self.name.clone().unwrap_or(builtin.name);
        let header = match &self.header {
            Some(header) => header.clone(),
            None => format!("You are {}, a highly {} AI.", name, role.as_str()),
        };
        AgentProfile::new(role, name, header)
            .map_err(|_| ConfigValidationError::EmptyAgentName(role.as_str()))
    }
}

/// Raw persona configuration for both agents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub logical: FileAgentProfile,
    pub creative: FileAgentProfile,
}

impl FileAgentsConfig {
    pub fn profile(&self, role: AgentRole) -> &FileAgentProfile {
        match role {
            AgentRole::Logical => &self.logical,
            AgentRole::Creative => &self.creative,
        }
    }

    pub fn to_roster(&self) -> Result<AgentRoster, ConfigValidationError> {
        Ok(AgentRoster::new(
            self.logical.to_profile(AgentRole::Logical)?,
            self.creative.to_profile(AgentRole::Creative)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_profiles_match_builtin_roster() {
        let roster = FileAgentsConfig::default().to_roster().unwrap();
        assert_eq!(roster, AgentRoster::default());
    }

    #[test]
    fn test_renamed_agent_gets_matching_header() {
        let config = FileAgentsConfig {
            creative: FileAgentProfile {
                name: Some("Iris".to_string()),
                header: None,
            },
            ..Default::default()
        };
        let roster = config.to_roster().unwrap();
        assert_eq!(roster.creative.header, "You are Iris, a highly creative AI.");
        assert_eq!(roster.logical.name, "Cognito");
    }
}
