//! Generic lifecycle framework for nested components.
//!
//! This module provides the building blocks the load test node uses to sequence the
//! components it owns.
//!
//! # Main Components
//!
//! - [`LifecycleComponent`] - Trait implemented by every managed component
//! - [`NestedComponent`] - A component plus the status its owner tracks for it
//! - [`start_nested_component`] / [`stop_nested_component`] - The nested start/stop protocol
//! - [`LifecycleError`], [`ComponentError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for recording components, agents and progress monitors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
