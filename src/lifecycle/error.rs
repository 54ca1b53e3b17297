//! Error types for the load test node.

use std::fmt::{self, Display};

use thiserror::Error;

use crate::agent_manager::AgentError;
use crate::config::ConfigurationError;
use crate::framework::{ComponentError, LifecyclePhase};

/// Phase of the node's own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Created,
    Initialized,
    Running,
    Stopped,
    Failed,
}

impl Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Errors that can occur while bootstrapping or tearing down the node.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NodeError {
    /// The component registry could not be resolved.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A required well-known component is not registered.
    #[error("{0}")]
    MissingComponent(String),

    /// A nested component failed one of its lifecycle hooks.
    #[error(transparent)]
    Lifecycle(#[from] ComponentError),

    /// An agent failed to start its load test.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Several agents failed to start (only with the `isolate` failure policy).
    #[error(
        "{} agent(s) failed to start: {}",
        .0.len(),
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Agents(Vec<AgentError>),

    /// An operation was called out of order.
    #[error("Cannot {operation} node while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: NodeState,
    },
}

/// The first fatal error of a run, kept for the process entry point.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Load test node failed to {phase}: {error}")]
pub struct StartupError {
    phase: LifecyclePhase,
    error: NodeError,
}

impl StartupError {
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn error(&self) -> &NodeError {
        &self.error
    }
}

/// Holds at most one [`StartupError`]. Once set it is never overwritten.
#[derive(Debug, Default)]
pub struct StartupErrorCarrier {
    error: Option<StartupError>,
}

impl StartupErrorCarrier {
    /// Records `error` unless an earlier one was already captured.
    /// Returns whether this call recorded it.
    pub fn record(&mut self, phase: LifecyclePhase, error: NodeError) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(StartupError { phase, error });
        true
    }

    pub fn get(&self) -> Option<&StartupError> {
        self.error.as_ref()
    }
}
