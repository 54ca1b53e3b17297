//! Configuration management.
//!
//! # Data Flow
//! ```text
//! loadtest.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → NodeConfig (validated, immutable)
//!     → registry builds the named components from it
//! ```
//!
//! # Design Decisions
//! - Every component is declared under `[components.<name>]`; the name is what the node looks up
//! - `type` inside each table selects the implementation
//! - Validation returns all problems, not just the first

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::ConfigurationError;
pub use loader::{load_config, parse_config};
pub use schema::*;
