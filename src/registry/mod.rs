//! Named component registry.
//!
//! The registry is a plain name → component table, filled once when configuration is
//! resolved. The node takes the components it needs out of it by well-known name and
//! owns them from then on.

pub mod resolver;

pub use resolver::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::agent_manager::{AgentManager, AgentPool, IntervalAgent, LoadTestAgent};
use crate::config::{AgentConfig, AgentPoolConfig, ComponentConfig, NodeConfig, NodeSettings};
use crate::server_manager::{ConnectionServerManager, ServerManager};

/// Name the server manager is registered under.
pub const SERVER_MANAGER: &str = "server-manager";

/// Name the agent manager is registered under.
pub const AGENT_MANAGER: &str = "agent-manager";

/// A registered component, by kind.
pub enum Component {
    ServerManager(Box<dyn ServerManager>),
    AgentManager(Box<dyn AgentManager>),
}

impl Component {
    pub fn kind(&self) -> &'static str {
        match self {
            Component::ServerManager(_) => "server manager",
            Component::AgentManager(_) => "agent manager",
        }
    }
}

/// Components resolved from configuration, plus the node settings that came with them.
#[derive(Default)]
pub struct ComponentRegistry {
    settings: NodeSettings,
    components: HashMap<String, Component>,
}

impl ComponentRegistry {
    pub fn new(settings: NodeSettings) -> Self {
        Self {
            settings,
            components: HashMap::new(),
        }
    }

    /// Builds every configured component.
    ///
    /// `config` is expected to be validated already, as returned by
    /// [`load_config`](crate::config::load_config) or [`parse_config`](crate::config::parse_config).
    pub fn from_config(config: &NodeConfig) -> Self {
        let mut registry = Self::new(config.node.clone());
        for (name, component) in &config.components {
            registry.register(name.clone(), build_component(name, component));
        }
        registry
    }

    /// Adds a component, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, component: Component) -> &mut Self {
        let name = name.into();
        debug!(%name, kind = component.kind(), "Registered component");
        self.components.insert(name, component);
        self
    }

    /// Removes and returns the component registered under `name`.
    pub fn take(&mut self, name: &str) -> Option<Component> {
        self.components.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Kind of the component registered under `name`, if any.
    pub fn kind_of(&self, name: &str) -> Option<&'static str> {
        self.components.get(name).map(Component::kind)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.components.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn settings(&self) -> &NodeSettings {
        &self.settings
    }
}

fn build_component(name: &str, config: &ComponentConfig) -> Component {
    match config {
        ComponentConfig::Connection(settings) => {
            Component::ServerManager(Box::new(ConnectionServerManager::new(settings.clone())))
        }
        ComponentConfig::AgentPool(pool) => Component::AgentManager(Box::new(build_pool(name, pool))),
    }
}

fn build_pool(name: &str, config: &AgentPoolConfig) -> AgentPool {
    let mut pool = AgentPool::new(format!("Agent pool '{}'", name));
    for agent in &config.agents {
        pool.add_agent(build_agent(agent));
    }
    pool
}

fn build_agent(config: &AgentConfig) -> Arc<dyn LoadTestAgent> {
    match config {
        AgentConfig::Interval(agent) => Arc::new(IntervalAgent::new(
            agent.name.clone(),
            Duration::from_millis(agent.interval_ms),
            agent.events,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::framework::mock::{CallLog, MockComponent};

    #[test]
    fn test_from_config_builds_named_components() {
        let config = parse_config(
            r#"
            [components.server-manager]
            type = "connection"
            hostname = "localhost"

            [components.agent-manager]
            type = "agent-pool"

            [[components.agent-manager.agents]]
            type = "interval"
            name = "first"

            [[components.agent-manager.agents]]
            type = "interval"
            name = "second"
            "#,
        )
        .unwrap();

        let mut registry = ComponentRegistry::from_config(&config);

        assert_eq!(registry.names(), vec![AGENT_MANAGER, SERVER_MANAGER]);
        match registry.take(SERVER_MANAGER) {
            Some(Component::ServerManager(manager)) => {
                assert_eq!(manager.endpoint(), "default@localhost:8080")
            }
            _ => panic!("expected a server manager"),
        }
        match registry.take(AGENT_MANAGER) {
            Some(Component::AgentManager(manager)) => {
                let names: Vec<&str> = manager.agents().iter().map(|a| a.name()).collect();
                assert_eq!(names, vec!["first", "second"]);
            }
            _ => panic!("expected an agent manager"),
        }
    }

    #[test]
    fn test_take_removes_component() {
        let log = CallLog::new();
        let mut registry = ComponentRegistry::default();
        registry.register(
            SERVER_MANAGER,
            Component::ServerManager(Box::new(MockComponent::new("server", &log))),
        );

        assert!(registry.contains(SERVER_MANAGER));
        assert!(registry.take(SERVER_MANAGER).is_some());
        assert!(!registry.contains(SERVER_MANAGER));
        assert!(registry.take(SERVER_MANAGER).is_none());
    }

    #[test]
    fn test_kind_of_reports_registered_kind() {
        let log = CallLog::new();
        let mut registry = ComponentRegistry::default();
        registry.register(
            "standby",
            Component::ServerManager(Box::new(MockComponent::new("server", &log))),
        );

        assert_eq!(registry.kind_of("standby"), Some("server manager"));
        assert_eq!(registry.kind_of("missing"), None);
    }

    #[test]
    fn test_from_config_builds_without_revalidating() {
        let mut config = NodeConfig::default();
        config.components.insert(
            AGENT_MANAGER.into(),
            ComponentConfig::AgentPool(AgentPoolConfig {
                agents: vec![AgentConfig::Interval(crate::config::IntervalAgentConfig {
                    name: "zero".into(),
                    interval_ms: 0,
                    events: 1,
                })],
            }),
        );

        let registry = ComponentRegistry::from_config(&config);

        assert_eq!(registry.kind_of(AGENT_MANAGER), Some("agent manager"));
    }
}
