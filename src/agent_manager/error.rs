//! Error types for load test agents.

use thiserror::Error;

/// Errors that can occur while starting an agent's load test.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AgentError {
    /// `start_load_test` was called on an agent that is already running.
    #[error("Load test already started for agent '{0}'")]
    AlreadyStarted(String),

    /// The agent could not begin generating load.
    #[error("Agent '{agent}' failed to start load test: {reason}")]
    StartFailed { agent: String, reason: String },
}
