//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the node's TOML file.
//! Component tables are internally tagged by `type`, which selects the implementation
//! the registry builds for that name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for a load test node.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// Node-wide settings.
    pub node: NodeSettings,

    /// Named components, keyed by the name the node looks them up by.
    pub components: BTreeMap<String, ComponentConfig>,
}

/// Node-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NodeSettings {
    /// Display name, used in the banner and the state report.
    pub name: String,

    /// What to do when an agent fails to start.
    pub agent_failure_policy: AgentFailurePolicy,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            name: "Load Test Node".to_string(),
            agent_failure_policy: AgentFailurePolicy::default(),
        }
    }
}

/// How the agent fan-out reacts to a failing agent.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AgentFailurePolicy {
    /// Stop at the first failing agent; later agents are never started.
    #[default]
    FailFast,

    /// Start every agent, then report all failures together.
    Isolate,
}

/// A configured component. The `type` key picks the variant.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ComponentConfig {
    Connection(ConnectionConfig),
    AgentPool(AgentPoolConfig),
}

/// Connection settings for the system under test.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectionConfig {
    pub hostname: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_tenant")]
    pub tenant: String,
}

fn default_port() -> u16 {
    8080
}

fn default_tenant() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AgentPoolConfig {
    /// Agents in the order they are registered and started.
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

/// A configured agent. The `type` key picks the variant.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AgentConfig {
    Interval(IntervalAgentConfig),
}

impl AgentConfig {
    pub fn name(&self) -> &str {
        match self {
            AgentConfig::Interval(agent) => &agent.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntervalAgentConfig {
    pub name: String,

    /// Milliseconds between two events.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Number of events to send; 0 runs until the node stops.
    #[serde(default)]
    pub events: u64,
}

fn default_interval_ms() -> u64 {
    1000
}
