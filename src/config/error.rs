//! Error types for configuration loading and component resolution.

use thiserror::Error;

/// Errors that prevent the component registry from being resolved.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    /// The configuration source does not exist.
    #[error("Configuration not found: {0}")]
    SourceMissing(String),

    /// The configuration source exists but could not be read.
    #[error("Unable to read configuration {path}: {reason}")]
    Io { path: String, reason: String },

    /// The configuration could not be parsed.
    #[error("Malformed configuration: {0}")]
    Malformed(String),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {}", .0.join(", "))]
    Invalid(Vec<String>),

    /// A well-known name resolved to a component of the wrong kind.
    #[error("Component '{component}' is not a {expected}")]
    WrongKind {
        component: String,
        expected: &'static str,
    },
}
