//! Agent definitions and the agent-loading collaborator.

use crate::error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural description of an agent tree, sufficient for graph rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDefinition {
    pub name: String,
    #[serde(default)]
    pub sub_agents: Vec<AgentDefinition>,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_agents: Vec::new(),
        }
    }

    pub fn with_sub_agents(mut self, sub_agents: Vec<AgentDefinition>) -> Self {
        self.sub_agents = sub_agents;
        self
    }
}

/// Loads agent definitions by application name.
pub trait AgentLoader: Send + Sync {
    fn list_agents(&self) -> Vec<String>;

    fn load_agent(&self, name: &str) -> Result<AgentDefinition>;
}

/// Agent loader backed by a fixed in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticAgentLoader {
    agents: HashMap<String, AgentDefinition>,
}

impl StaticAgentLoader {
    pub fn new(agents: HashMap<String, AgentDefinition>) -> Self {
        Self { agents }
    }
}

impl AgentLoader for StaticAgentLoader {
    fn list_agents(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    fn load_agent(&self, name: &str) -> Result<AgentDefinition> {
        self.agents
            .get(name)
            .cloned()
            .ok_or_else(|| TelemetryError::AgentNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> StaticAgentLoader {
        let mut agents = HashMap::new();
        agents.insert(
            "weather".to_string(),
            AgentDefinition::new("root")
                .with_sub_agents(vec![AgentDefinition::new("forecaster")]),
        );
        StaticAgentLoader::new(agents)
    }

    #[test]
    fn test_load_agent() {
        let agent = loader().load_agent("weather").unwrap();
        assert_eq!(agent.name, "root");
        assert_eq!(agent.sub_agents.len(), 1);
        assert_eq!(agent.sub_agents[0].name, "forecaster");
    }

    #[test]
    fn test_load_unknown_agent() {
        let err = loader().load_agent("missing").unwrap_err();
        assert_eq!(err.to_string(), "agent missing not found");
    }

    #[test]
    fn test_list_agents() {
        assert_eq!(loader().list_agents(), vec!["weather".to_string()]);
    }
}
