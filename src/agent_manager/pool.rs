//! Default agent manager: a fixed pool of agents built from configuration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent_manager::{AgentManager, LoadTestAgent};
use crate::framework::{LifecycleComponent, LifecycleError, ProgressMonitor};

/// Holds the configured agents in registration order.
///
/// The pool does not start agents itself; the node fans out to them once every
/// manager is up. On `stop` the pool asks each agent to wind down.
pub struct AgentPool {
    name: String,
    agents: Vec<Arc<dyn LoadTestAgent>>,
}

impl AgentPool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agents: Vec::new(),
        }
    }

    pub fn add_agent(&mut self, agent: Arc<dyn LoadTestAgent>) {
        self.agents.push(agent);
    }
}

#[async_trait]
impl LifecycleComponent for AgentPool {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn initialize(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        if self.agents.is_empty() {
            warn!(pool = %self.name, "No agents configured");
        }
        monitor.report_progress(&format!("Initialized {} agents", self.agents.len()));
        Ok(())
    }

    async fn start(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        info!(pool = %self.name, agents = self.agents.len(), "Agent pool ready");
        Ok(())
    }

    async fn stop(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        let mut last_error = None;
        for agent in &self.agents {
            monitor.report_progress(&format!("Stopping agent {}", agent.name()));
            if let Err(e) = agent.stop_load_test().await {
                warn!(agent = agent.name(), error = %e, "Agent did not stop cleanly");
                last_error = Some(e);
            }
        }
        match last_error {
            Some(e) => Err(LifecycleError::Failed(e.to_string())),
            None => Ok(()),
        }
    }
}

impl AgentManager for AgentPool {
    fn agents(&self) -> &[Arc<dyn LoadTestAgent>] {
        &self.agents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{CallLog, MockAgent, RecordingMonitor};

    #[tokio::test]
    async fn test_stop_asks_every_agent_to_stop() {
        let log = CallLog::new();
        let mut pool = AgentPool::new("pool");
        pool.add_agent(Arc::new(MockAgent::new("A", &log)));
        pool.add_agent(Arc::new(MockAgent::new("B", &log)));

        pool.stop(&RecordingMonitor::new()).await.unwrap();

        assert_eq!(log.calls(), vec!["A:stop_load_test", "B:stop_load_test"]);
    }

    #[tokio::test]
    async fn test_agents_keep_registration_order() {
        let log = CallLog::new();
        let mut pool = AgentPool::new("pool");
        for name in ["C", "A", "B"] {
            pool.add_agent(Arc::new(MockAgent::new(name, &log)));
        }

        let names: Vec<&str> = pool.agents().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
