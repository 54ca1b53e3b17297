//! # Core Lifecycle Framework
//!
//! This module defines the generic building blocks every managed component is built on.
//!
//! ## Key Types
//!
//! - [`LifecycleComponent`]: The trait that all nested components must implement.
//! - [`NestedComponent`]: Owns a component and tracks its [`ComponentStatus`].
//! - [`ProgressMonitor`]: The progress-reporting handle passed to every lifecycle hook.
//! - [`LifecycleError`] / [`ComponentError`]: What a hook reports, and what the helpers propagate.

use std::fmt::{self, Display};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks)
// =============================================================================

/// Trait that any component managed by the load test node must implement.
///
/// # Architecture Note
/// The orchestrator never looks at the concrete type behind a component. It only
/// calls through this contract, which is what allows server and agent managers to
/// be swapped by configuration without touching the orchestration code.
///
/// # Provided Methods (Hooks)
/// [`LifecycleComponent::initialize`] and [`LifecycleComponent::stop`] default to doing
/// nothing (`Ok(())`). Only [`LifecycleComponent::start`] is required.
#[async_trait]
pub trait LifecycleComponent: Send + Sync {
    /// Human-readable component name used in logs and the state report.
    fn name(&self) -> String;

    /// Prepare the component. Called once, before `start`.
    async fn initialize(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        Ok(())
    }

    /// Bring the component up.
    async fn start(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError>;

    /// Tear the component down. Must tolerate being called on a component that never started.
    async fn stop(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        Ok(())
    }
}

/// Progress-reporting handle passed to each lifecycle hook.
pub trait ProgressMonitor: Send + Sync {
    /// Report that a step of the current operation has been reached.
    fn report_progress(&self, message: &str);
}

/// A [`ProgressMonitor`] that writes every step to the `tracing` log.
#[derive(Debug, Clone)]
pub struct LogProgressMonitor {
    owner: String,
}

impl LogProgressMonitor {
    pub fn new(owner: impl Into<String>) -> Self {
        Self { owner: owner.into() }
    }

    /// Name every progress line is tagged with.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl ProgressMonitor for LogProgressMonitor {
    fn report_progress(&self, message: &str) {
        debug!(owner = %self.owner, "{}", message);
    }
}

// =============================================================================
// 2. STATUS & ERRORS
// =============================================================================

/// The lifecycle operation a component was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Initialize,
    Start,
    Stop,
}

impl Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            LifecyclePhase::Initialize => "initialize",
            LifecyclePhase::Start => "start",
            LifecyclePhase::Stop => "stop",
        };
        f.write_str(phase)
    }
}

/// Status of a nested component as seen by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Created,
    Initializing,
    Initialized,
    Starting,
    Started,
    Stopping,
    Stopped,
    InitializationError,
    LifecycleError,
}

impl Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Errors a component reports from one of its own lifecycle hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    /// The component's configuration cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{0}")]
    Failed(String),
}

/// A [`LifecycleError`] tagged with the component and the phase it failed in.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unable to {phase} '{component}': {source}")]
pub struct ComponentError {
    pub component: String,
    pub phase: LifecyclePhase,
    #[source]
    pub source: LifecycleError,
}

// =============================================================================
// 3. NESTED COMPONENTS
// =============================================================================

/// A child component owned and sequenced by a parent.
///
/// `C` is usually a trait object such as `dyn ServerManager`, so the owner can hold
/// any configured implementation while still tracking its status.
pub struct NestedComponent<C: LifecycleComponent + ?Sized> {
    component: Box<C>,
    status: ComponentStatus,
}

impl<C: LifecycleComponent + ?Sized> NestedComponent<C> {
    pub fn new(component: Box<C>) -> Self {
        Self {
            component,
            status: ComponentStatus::Created,
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn status(&self) -> ComponentStatus {
        self.status
    }

    pub fn name(&self) -> String {
        self.component.name()
    }

    fn fail(&mut self, phase: LifecyclePhase, source: LifecycleError) -> ComponentError {
        self.status = match phase {
            LifecyclePhase::Initialize => ComponentStatus::InitializationError,
            LifecyclePhase::Start | LifecyclePhase::Stop => ComponentStatus::LifecycleError,
        };
        ComponentError {
            component: self.component.name(),
            phase,
            source,
        }
    }
}

/// Initializes then starts a nested component.
///
/// Initialization failure short-circuits: `start` is never called. When `require` is
/// true the first error is returned to the caller; otherwise it is logged and the
/// caller carries on (the failure is still visible through [`NestedComponent::status`]).
pub async fn start_nested_component<C: LifecycleComponent + ?Sized>(
    nested: &mut NestedComponent<C>,
    monitor: &dyn ProgressMonitor,
    require: bool,
) -> Result<(), ComponentError> {
    let result = initialize_and_start(nested, monitor).await;
    match result {
        Ok(()) => Ok(()),
        Err(e) if require => Err(e),
        Err(e) => {
            warn!(component = %e.component, error = %e, "Optional component failed to start");
            Ok(())
        }
    }
}

async fn initialize_and_start<C: LifecycleComponent + ?Sized>(
    nested: &mut NestedComponent<C>,
    monitor: &dyn ProgressMonitor,
) -> Result<(), ComponentError> {
    let name = nested.component.name();

    nested.status = ComponentStatus::Initializing;
    monitor.report_progress(&format!("Initializing {}", name));
    if let Err(e) = nested.component.initialize(monitor).await {
        return Err(nested.fail(LifecyclePhase::Initialize, e));
    }
    nested.status = ComponentStatus::Initialized;

    nested.status = ComponentStatus::Starting;
    monitor.report_progress(&format!("Starting {}", name));
    if let Err(e) = nested.component.start(monitor).await {
        return Err(nested.fail(LifecyclePhase::Start, e));
    }
    nested.status = ComponentStatus::Started;

    info!(component = %name, "Started");
    Ok(())
}

/// Stops a nested component. Components that are already stopped are left alone.
pub async fn stop_nested_component<C: LifecycleComponent + ?Sized>(
    nested: &mut NestedComponent<C>,
    monitor: &dyn ProgressMonitor,
) -> Result<(), ComponentError> {
    if nested.status == ComponentStatus::Stopped {
        return Ok(());
    }
    let name = nested.component.name();

    nested.status = ComponentStatus::Stopping;
    monitor.report_progress(&format!("Stopping {}", name));
    if let Err(e) = nested.component.stop(monitor).await {
        return Err(nested.fail(LifecyclePhase::Stop, e));
    }
    nested.status = ComponentStatus::Stopped;

    info!(component = %name, "Stopped");
    Ok(())
}
