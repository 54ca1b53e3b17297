use tracing::{debug, error, info, warn};

use crate::agent_manager::AgentManager;
use crate::config::{AgentFailurePolicy, ConfigurationError, NodeSettings};
use crate::framework::{
    start_nested_component, stop_nested_component, LifecyclePhase, LogProgressMonitor,
    NestedComponent, ProgressMonitor,
};
use crate::lifecycle::banner::{render_banner, Version};
use crate::lifecycle::error::{NodeError, NodeState, StartupError, StartupErrorCarrier};
use crate::registry::{
    Component, ComponentRegistry, ConfigurationResolver, AGENT_MANAGER, SERVER_MANAGER,
};
use crate::server_manager::ServerManager;

/// The load test node: resolves its components, runs them, and tears them down.
///
/// `LoadTestNode` is responsible for:
/// - **Resolution**: Loading the registry and taking the server and agent managers out of it
/// - **Ordered Startup**: Server manager first, then agent manager, then the agent fan-out
/// - **Ordered Shutdown**: Agent manager first, then server manager, best-effort
/// - **Failure Capture**: Keeping the first fatal startup error for the entry point
///
/// # Lifecycle
///
/// ```text
/// Created --initialize()--> Initialized --start()--> Running --stop()--> Stopped
///     any failure in initialize/start ----> Failed --stop()--> Stopped
/// ```
///
/// # Example
///
/// ```ignore
/// let mut node = LoadTestNode::new(FileConfigurationResolver::new("loadtest.toml"));
/// let monitor = LogProgressMonitor::new(node.name());
///
/// node.initialize(&monitor).await?;
/// node.start(&monitor).await?;
/// // ... agents are generating load ...
/// node.stop(&monitor).await?;
/// ```
pub struct LoadTestNode {
    version: Version,
    resolver: Box<dyn ConfigurationResolver>,
    state: NodeState,
    settings: NodeSettings,

    /// Whatever is left in the registry once the managers have been taken out.
    registry: Option<ComponentRegistry>,

    server_manager: Option<NestedComponent<dyn ServerManager>>,
    agent_manager: Option<NestedComponent<dyn AgentManager>>,

    banner: Option<String>,
    startup_error: StartupErrorCarrier,
}

impl LoadTestNode {
    pub fn new(resolver: impl ConfigurationResolver + 'static) -> Self {
        Self {
            version: Version::current(),
            resolver: Box::new(resolver),
            state: NodeState::Created,
            settings: NodeSettings::default(),
            registry: None,
            server_manager: None,
            agent_manager: None,
            banner: None,
            startup_error: StartupErrorCarrier::default(),
        }
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.settings.name, self.version.identifier())
    }

    /// A monitor that logs progress under the node's current name.
    ///
    /// The configured name is only known once `initialize` has resolved the
    /// configuration, so callers take a fresh monitor after that.
    pub fn progress_monitor(&self) -> LogProgressMonitor {
        LogProgressMonitor::new(self.name())
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn server_manager(&self) -> Option<&dyn ServerManager> {
        self.server_manager.as_ref().map(|nested| nested.component())
    }

    pub fn agent_manager(&self) -> Option<&dyn AgentManager> {
        self.agent_manager.as_ref().map(|nested| nested.component())
    }

    pub fn registry(&self) -> Option<&ComponentRegistry> {
        self.registry.as_ref()
    }

    /// The banner shown when the node started, if it got that far.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// The first fatal error of this run, if any.
    pub fn startup_error(&self) -> Option<&StartupError> {
        self.startup_error.get()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Resolves the registry, then the server manager, then the agent manager.
    ///
    /// Each step fails fast. If the agent manager is missing, the server manager that
    /// was already resolved stays in place.
    pub async fn initialize(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        self.expect_state(NodeState::Created, "initialize")?;
        let result = self.resolve_components(monitor);
        self.finish_phase(LifecyclePhase::Initialize, result, NodeState::Initialized)
    }

    /// Starts both managers, shows the banner, then starts every agent's load test.
    pub async fn start(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        self.expect_state(NodeState::Initialized, "start")?;
        let result = self.start_components(monitor).await;
        self.finish_phase(LifecyclePhase::Start, result, NodeState::Running)
    }

    /// Stops the agent manager, then the server manager.
    ///
    /// Both are attempted even if the first fails; the last error is returned.
    /// Calling `stop` again once stopped does nothing.
    pub async fn stop(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        if self.state == NodeState::Stopped {
            debug!(node = %self.name(), "Already stopped");
            return Ok(());
        }

        let mut last_error = None;
        if let Some(agent_manager) = self.agent_manager.as_mut() {
            if let Err(e) = stop_nested_component(agent_manager, monitor).await {
                warn!(error = %e, "Agent manager did not stop cleanly");
                last_error = Some(e);
            }
        }
        if let Some(server_manager) = self.server_manager.as_mut() {
            if let Err(e) = stop_nested_component(server_manager, monitor).await {
                warn!(error = %e, "Server manager did not stop cleanly");
                last_error = Some(e);
            }
        }

        self.state = NodeState::Stopped;
        info!(node = %self.name(), "Stopped");
        match last_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Renders the node and its component tree.
    ///
    /// Components left in the registry after resolution are listed as unused.
    pub fn state_report(&self) -> String {
        let mut report = format!("{} ({})", self.name(), self.state);
        if let Some(server_manager) = &self.server_manager {
            report.push_str(&format!(
                "\n  + {}: {} ({})",
                SERVER_MANAGER,
                server_manager.name(),
                server_manager.status()
            ));
        }
        if let Some(agent_manager) = &self.agent_manager {
            report.push_str(&format!(
                "\n  + {}: {} ({})",
                AGENT_MANAGER,
                agent_manager.name(),
                agent_manager.status()
            ));
            for agent in agent_manager.component().agents() {
                report.push_str(&format!("\n      - {}", agent.name()));
            }
        }
        if let Some(registry) = &self.registry {
            for name in registry.names() {
                let kind = registry.kind_of(&name).unwrap_or("component");
                report.push_str(&format!("\n  ~ {}: {} (unused)", name, kind));
            }
        }
        report
    }

    pub fn log_state(&self) {
        info!("\n\nLoad Test Node State:\n{}\n", self.state_report());
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn expect_state(&self, expected: NodeState, operation: &'static str) -> Result<(), NodeError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(NodeError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn finish_phase(
        &mut self,
        phase: LifecyclePhase,
        result: Result<(), NodeError>,
        next: NodeState,
    ) -> Result<(), NodeError> {
        match result {
            Ok(()) => {
                self.state = next;
                info!(node = %self.name(), state = %next, "Phase complete");
                Ok(())
            }
            Err(e) => {
                error!(node = %self.name(), %phase, error = %e, "Startup failed");
                self.state = NodeState::Failed;
                self.startup_error.record(phase, e.clone());
                Err(e)
            }
        }
    }

    fn resolve_components(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        monitor.report_progress("Resolving configuration");
        let mut registry = self.resolver.resolve()?;

        monitor.report_progress("Resolving server manager");
        let server_manager = take_server_manager(&mut registry)?;
        info!(
            implementation = %server_manager.name(),
            endpoint = %server_manager.endpoint(),
            "Server manager resolved"
        );
        self.server_manager = Some(NestedComponent::new(server_manager));

        monitor.report_progress("Resolving agent manager");
        let agent_manager = take_agent_manager(&mut registry)?;
        info!(
            implementation = %agent_manager.name(),
            agents = agent_manager.agents().len(),
            "Agent manager resolved"
        );
        self.agent_manager = Some(NestedComponent::new(agent_manager));

        for name in registry.names() {
            warn!(component = %name, "Configured component is not used by the node");
        }
        self.settings = registry.settings().clone();
        self.registry = Some(registry);
        Ok(())
    }

    async fn start_components(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        if let Some(server_manager) = self.server_manager.as_mut() {
            start_nested_component(server_manager, monitor, true).await?;
        }
        if let Some(agent_manager) = self.agent_manager.as_mut() {
            start_nested_component(agent_manager, monitor, true).await?;
        }

        monitor.report_progress("Showing banner");
        self.show_banner();
        self.start_agents(monitor).await
    }

    fn show_banner(&mut self) {
        let banner = render_banner(&self.settings.name, &self.version);
        info!("\n{}\n", banner);
        self.banner = Some(banner);
    }

    /// Sends the start signal to every agent, in registration order.
    async fn start_agents(&self, monitor: &dyn ProgressMonitor) -> Result<(), NodeError> {
        let Some(agent_manager) = self.agent_manager.as_ref() else {
            return Ok(());
        };
        let agents = agent_manager.component().agents();
        let policy = self.settings.agent_failure_policy;
        info!(agents = agents.len(), ?policy, "Starting load tests for all agents");

        let mut failures = Vec::new();
        for agent in agents {
            monitor.report_progress(&format!("Starting load test for {}", agent.name()));
            if let Err(e) = agent.start_load_test().await {
                if policy == AgentFailurePolicy::FailFast {
                    return Err(e.into());
                }
                warn!(agent = agent.name(), error = %e, "Agent failed to start");
                failures.push(e);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NodeError::Agents(failures))
        }
    }
}

fn take_server_manager(
    registry: &mut ComponentRegistry,
) -> Result<Box<dyn ServerManager>, NodeError> {
    match registry.take(SERVER_MANAGER) {
        Some(Component::ServerManager(manager)) => Ok(manager),
        Some(_) => Err(ConfigurationError::WrongKind {
            component: SERVER_MANAGER.to_string(),
            expected: "server manager",
        }
        .into()),
        None => Err(NodeError::MissingComponent(
            "No connection information configured".to_string(),
        )),
    }
}

fn take_agent_manager(
    registry: &mut ComponentRegistry,
) -> Result<Box<dyn AgentManager>, NodeError> {
    match registry.take(AGENT_MANAGER) {
        Some(Component::AgentManager(manager)) => Ok(manager),
        Some(_) => Err(ConfigurationError::WrongKind {
            component: AGENT_MANAGER.to_string(),
            expected: "agent manager",
        }
        .into()),
        None => Err(NodeError::MissingComponent(
            "No agent manager configured".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{
        CallLog, MockAgent, MockAgentManager, MockComponent, RecordingMonitor,
    };

    fn node_with(log: &CallLog, agents: &[&str]) -> LoadTestNode {
        let log = log.clone();
        let agents: Vec<String> = agents.iter().map(|a| a.to_string()).collect();
        LoadTestNode::new(move || {
            let mut registry = ComponentRegistry::default();
            let mut agent_manager = MockAgentManager::new("agents", &log);
            for agent in &agents {
                agent_manager = agent_manager.with_agent(MockAgent::new(agent.clone(), &log));
            }
            registry
                .register(
                    SERVER_MANAGER,
                    Component::ServerManager(Box::new(MockComponent::new("server", &log))),
                )
                .register(AGENT_MANAGER, Component::AgentManager(Box::new(agent_manager)));
            Ok::<_, ConfigurationError>(registry)
        })
    }

    #[tokio::test]
    async fn test_start_before_initialize_is_rejected() {
        let log = CallLog::new();
        let mut node = node_with(&log, &[]);

        let err = node.start(&RecordingMonitor::new()).await.unwrap_err();

        assert_eq!(
            err,
            NodeError::InvalidTransition {
                operation: "start",
                state: NodeState::Created
            }
        );
        assert_eq!(node.state(), NodeState::Created);
        assert!(node.startup_error().is_none());
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_twice_is_rejected() {
        let log = CallLog::new();
        let monitor = RecordingMonitor::new();
        let mut node = node_with(&log, &[]);

        node.initialize(&monitor).await.unwrap();
        let err = node.initialize(&monitor).await.unwrap_err();

        assert!(matches!(err, NodeError::InvalidTransition { .. }));
        assert_eq!(node.state(), NodeState::Initialized);
    }

    #[tokio::test]
    async fn test_state_report_lists_component_tree() {
        let log = CallLog::new();
        let monitor = RecordingMonitor::new();
        let mut node = node_with(&log, &["A", "B"]);

        node.initialize(&monitor).await.unwrap();
        node.start(&monitor).await.unwrap();

        let expected = format!(
            "Load Test Node {} (Running)\n  + server-manager: server (Started)\n  + agent-manager: agents (Started)\n      - A\n      - B",
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(node.state_report(), expected);
    }

    #[tokio::test]
    async fn test_progress_monitor_uses_configured_name() {
        let mut node = LoadTestNode::new(|| {
            let settings = NodeSettings {
                name: "Bench Node".into(),
                ..NodeSettings::default()
            };
            let log = CallLog::new();
            let mut registry = ComponentRegistry::new(settings);
            registry
                .register(
                    SERVER_MANAGER,
                    Component::ServerManager(Box::new(MockComponent::new("server", &log))),
                )
                .register(
                    AGENT_MANAGER,
                    Component::AgentManager(Box::new(MockAgentManager::new("agents", &log))),
                );
            Ok::<_, ConfigurationError>(registry)
        });
        let version = env!("CARGO_PKG_VERSION");

        assert_eq!(
            node.progress_monitor().owner(),
            format!("Load Test Node {}", version)
        );
        node.initialize(&RecordingMonitor::new()).await.unwrap();
        assert_eq!(
            node.progress_monitor().owner(),
            format!("Bench Node {}", version)
        );
    }

    #[tokio::test]
    async fn test_progress_is_reported_in_order() {
        let log = CallLog::new();
        let monitor = RecordingMonitor::new();
        let mut node = node_with(&log, &["A"]);

        node.initialize(&monitor).await.unwrap();
        node.start(&monitor).await.unwrap();

        assert_eq!(
            monitor.messages(),
            vec![
                "Resolving configuration",
                "Resolving server manager",
                "Resolving agent manager",
                "Initializing server",
                "Starting server",
                "Initializing agents",
                "Starting agents",
                "Showing banner",
                "Starting load test for A",
            ]
        );
    }
}
