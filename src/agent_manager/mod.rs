//! Agent management: the agent contract, the manager contract and their default implementations.
//!
//! An agent is a workload that is started exactly once per run. How it generates
//! load is its own business; the node only ever sends it the start signal.

pub mod error;
pub mod interval_agent;
pub mod pool;

pub use error::*;
pub use interval_agent::*;
pub use pool::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::framework::LifecycleComponent;

/// A named, independently runnable load test workload.
#[async_trait]
pub trait LoadTestAgent: Send + Sync {
    fn name(&self) -> &str;

    /// Begin generating load. Returns once the workload has been kicked off; it does
    /// not wait for the load test to finish.
    async fn start_load_test(&self) -> Result<(), AgentError>;

    /// Ask a running workload to wind down. Only called by the owning manager.
    async fn stop_load_test(&self) -> Result<(), AgentError> {
        Ok(())
    }
}

/// A lifecycle component that owns the node's agents.
pub trait AgentManager: LifecycleComponent {
    /// Agents in registration order.
    fn agents(&self) -> &[Arc<dyn LoadTestAgent>];
}
