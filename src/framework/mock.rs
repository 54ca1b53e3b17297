//! # Mock Framework
//!
//! Utilities for testing the orchestrator in isolation.
//!
//! Every mock writes what happened to it into a shared [`CallLog`], so a test can
//! assert both *which* hooks ran and *in what order* across several components:
//!
//! ```ignore
//! let log = CallLog::new();
//! let server = MockComponent::new("server-manager", &log);
//! let agents = MockAgentManager::new("agent-manager", &log)
//!     .with_agent(MockAgent::new("A", &log))
//!     .with_agent(MockAgent::new("B", &log).failing());
//!
//! // ... register them, run the node ...
//!
//! assert_eq!(log.calls_matching(":start_load_test"), vec!["A:start_load_test", "B:start_load_test"]);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::agent_manager::{AgentError, AgentManager, LoadTestAgent};
use crate::framework::{LifecycleComponent, LifecycleError, LifecyclePhase, ProgressMonitor};
use crate::server_manager::ServerManager;

// =============================================================================
// CALL RECORDING
// =============================================================================

/// Ordered, shared record of calls made on mocks.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    /// All calls so far, in the order they were made.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose text contains `pattern`, in order.
    pub fn calls_matching(&self, pattern: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.contains(pattern))
            .collect()
    }
}

/// A [`ProgressMonitor`] that keeps every reported message.
#[derive(Debug, Default)]
pub struct RecordingMonitor {
    messages: Mutex<Vec<String>>,
}

impl RecordingMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressMonitor for RecordingMonitor {
    fn report_progress(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// =============================================================================
// MOCK COMPONENTS
// =============================================================================

/// A lifecycle component that records its hooks and can be told to fail one of them.
///
/// Also usable as a [`ServerManager`].
pub struct MockComponent {
    name: String,
    log: CallLog,
    fail_on: Option<LifecyclePhase>,
}

impl MockComponent {
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            fail_on: None,
        }
    }

    /// Makes the given hook return an error.
    pub fn fail_on(mut self, phase: LifecyclePhase) -> Self {
        self.fail_on = Some(phase);
        self
    }

    fn hook(&self, phase: LifecyclePhase) -> Result<(), LifecycleError> {
        self.log.record(format!("{}:{}", self.name, phase));
        if self.fail_on == Some(phase) {
            return Err(LifecycleError::Failed(format!(
                "{} refused to {}",
                self.name, phase
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleComponent for MockComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn initialize(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.hook(LifecyclePhase::Initialize)
    }

    async fn start(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.hook(LifecyclePhase::Start)
    }

    async fn stop(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.hook(LifecyclePhase::Stop)
    }
}

impl ServerManager for MockComponent {
    fn endpoint(&self) -> String {
        format!("mock://{}", self.name)
    }
}

/// An [`AgentManager`] backed by a [`MockComponent`] and a fixed list of agents.
pub struct MockAgentManager {
    inner: MockComponent,
    agents: Vec<Arc<dyn LoadTestAgent>>,
}

impl MockAgentManager {
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            inner: MockComponent::new(name, log),
            agents: Vec::new(),
        }
    }

    pub fn fail_on(mut self, phase: LifecyclePhase) -> Self {
        self.inner = self.inner.fail_on(phase);
        self
    }

    pub fn with_agent(mut self, agent: impl LoadTestAgent + 'static) -> Self {
        self.agents.push(Arc::new(agent));
        self
    }
}

#[async_trait]
impl LifecycleComponent for MockAgentManager {
    fn name(&self) -> String {
        self.inner.name()
    }

    async fn initialize(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.inner.initialize(monitor).await
    }

    async fn start(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.inner.start(monitor).await
    }

    async fn stop(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        self.inner.stop(monitor).await
    }
}

impl AgentManager for MockAgentManager {
    fn agents(&self) -> &[Arc<dyn LoadTestAgent>] {
        &self.agents
    }
}

/// A load test agent that records `start_load_test` calls.
pub struct MockAgent {
    name: String,
    log: CallLog,
    fail: bool,
}

impl MockAgent {
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            fail: false,
        }
    }

    /// Makes `start_load_test` fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl LoadTestAgent for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start_load_test(&self) -> Result<(), AgentError> {
        self.log.record(format!("{}:start_load_test", self.name));
        if self.fail {
            return Err(AgentError::StartFailed {
                agent: self.name.clone(),
                reason: "mock failure".into(),
            });
        }
        Ok(())
    }

    async fn stop_load_test(&self) -> Result<(), AgentError> {
        self.log.record(format!("{}:stop_load_test", self.name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_component_records_and_fails_on_request() {
        let log = CallLog::new();
        let monitor = RecordingMonitor::new();
        let mut component = MockComponent::new("server", &log).fail_on(LifecyclePhase::Stop);

        component.initialize(&monitor).await.unwrap();
        component.start(&monitor).await.unwrap();
        let err = component.stop(&monitor).await.unwrap_err();

        assert_eq!(err, LifecycleError::Failed("server refused to stop".into()));
        assert_eq!(
            log.calls(),
            vec!["server:initialize", "server:start", "server:stop"]
        );
    }

    #[tokio::test]
    async fn test_mock_agent_manager_exposes_agents_in_order() {
        let log = CallLog::new();
        let manager = MockAgentManager::new("agents", &log)
            .with_agent(MockAgent::new("A", &log))
            .with_agent(MockAgent::new("B", &log).failing());

        let names: Vec<&str> = manager.agents().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert!(manager.agents()[0].start_load_test().await.is_ok());
        assert!(manager.agents()[1].start_load_test().await.is_err());
        assert_eq!(log.calls_matching("start_load_test").len(), 2);
    }
}
