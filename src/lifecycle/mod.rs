//! # Node Lifecycle & Orchestration
//!
//! This module owns the bootstrap sequence of a load test node: the phased
//! initialize/start/stop protocol applied to the node's nested components.
//!
//! ## The Orchestration Pattern
//!
//! Individual components are simple; sequencing them is where the decisions live.
//! [`LoadTestNode`] is the conductor:
//!
//! 1. **Resolution** - Load the registry, take `server-manager` and `agent-manager` out of it
//! 2. **Ordered Startup** - Server manager, then agent manager, each via the nested-start protocol
//! 3. **Banner** - Name, version, OS and runtime, shown once both managers are up
//! 4. **Fan-out** - Start every agent's load test, once, in registration order
//! 5. **Ordered Shutdown** - Agent manager, then server manager, best-effort
//!
//! ## Explicit Context
//!
//! There is no global node. `main` constructs one [`LoadTestNode`] and drives it through
//! `&mut self`; the two manager references are written once during `initialize` and
//! only read afterwards.
//!
//! ## Failure Handling
//!
//! Every error in `initialize` or `start` aborts the sequence, moves the node to
//! [`NodeState::Failed`] and is captured as the run's [`StartupError`] (only the first one
//! is kept). `stop` is still safe to call afterwards.
//!
//! Agent fan-out follows [`AgentFailurePolicy`](crate::config::AgentFailurePolicy):
//! `fail-fast` (default) stops at the first failing agent, `isolate` starts them all and
//! reports every failure together.
//!
//! ## Observability
//!
//! See the [`tracing`] module for the subscriber setup and what is logged.

pub mod banner;
pub mod error;
pub mod load_test_node;
pub mod tracing;

pub use banner::*;
pub use error::*;
pub use load_test_node::*;
pub use self::tracing::*;
