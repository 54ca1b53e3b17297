//! # Load Test Node
//!
//! > **Bootstraps a load testing node: resolve, start, fan out, stop.**
//!
//! A node reads a TOML file describing a handful of named components, brings them up
//! in a fixed order, tells each configured agent to start its load test, and tears
//! everything down cleanly when asked to stop.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### A Registry, Not a Container
//!
//! The node needs exactly two well-known components: `server-manager` and
//! `agent-manager`. A plain `name → component` table filled once at startup is all the
//! "dependency injection" this takes. No reflection, no scoping, no dependency graph.
//!
//! ### Traits at the Seams
//!
//! The node only ever talks to [`LifecycleComponent`](framework::LifecycleComponent),
//! [`ServerManager`](server_manager::ServerManager),
//! [`AgentManager`](agent_manager::AgentManager) and
//! [`LoadTestAgent`](agent_manager::LoadTestAgent). Which implementation sits behind each
//! name is decided by configuration.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The lifecycle contract and the nested start/stop protocol.
//! - **Key items**: [`LifecycleComponent`](framework::LifecycleComponent),
//!   [`start_nested_component`](framework::start_nested_component).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! The node's state machine, banner and startup error capture.
//! - **Key items**: [`LoadTestNode`](lifecycle::LoadTestNode), [`StartupError`](lifecycle::StartupError).
//!
//! ### 3. Configuration ([`config`], [`registry`])
//! TOML schema, loading and validation; the named registry built from it.
//! - **Key items**: [`NodeConfig`](config::NodeConfig),
//!   [`ComponentRegistry`](registry::ComponentRegistry),
//!   [`FileConfigurationResolver`](registry::FileConfigurationResolver).
//!
//! ### 4. The Components ([`server_manager`], [`agent_manager`])
//! The default implementations the registry can build.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run until Ctrl+C
//! RUST_LOG=info cargo run -- --config loadtest.toml
//!
//! # Run for 30 seconds
//! cargo run -- --config loadtest.toml --duration-secs 30
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod agent_manager;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod registry;
pub mod server_manager;
