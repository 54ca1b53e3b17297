//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the load test node.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! It is called once, by the binary, before the node is created. Library code only
//! emits events; it never installs a subscriber.
//!
//! ## Configuration
//!
//! The node uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! Levels come from `RUST_LOG`; without it, `info` is used.
//!
//! ```bash
//! # Lifecycle milestones, banner and state report
//! RUST_LOG=info cargo run -- --config loadtest.toml
//!
//! # Every progress step reported by the components
//! RUST_LOG=debug cargo run -- --config loadtest.toml
//!
//! # Every synthetic event sent by every agent
//! RUST_LOG=trace cargo run -- --config loadtest.toml
//! ```
//!
//! ## What Gets Traced
//!
//! - **Node Lifecycle**: Phase completion, startup failure, stop
//! - **Component Lifecycle**: Started/Stopped per nested component, with its name
//! - **Progress**: Each step reported through [`LogProgressMonitor`](crate::framework::LogProgressMonitor) (debug)
//! - **Agents**: Load test start/finish with event counts, individual events (trace)
//!
//! ## Startup Trace Example
//!
//! ```text
//! INFO Loading configuration path="loadtest.toml"
//! INFO Server manager resolved implementation=Connection server manager endpoint=default@localhost:8080
//! INFO Agent manager resolved implementation=Agent pool 'agent-manager' agents=2
//! INFO Phase complete node=Load Test Node 0.1.0 state=Initialized
//! INFO Targeting instance endpoint=default@localhost:8080
//! INFO Started component=Connection server manager
//! INFO Agent pool ready pool=Agent pool 'agent-manager' agents=2
//! INFO Started component=Agent pool 'agent-manager'
//! INFO Starting load tests for all agents agents=2 policy=FailFast
//! INFO Starting load test agent=agent-a interval_ms=250 events=100
//! INFO Starting load test agent=agent-b interval_ms=1000 events=0
//! INFO Phase complete node=Load Test Node 0.1.0 state=Running
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}
