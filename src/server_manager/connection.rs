//! Server manager that targets a single instance by host, port and tenant.

use async_trait::async_trait;
use tracing::info;

use crate::config::ConnectionConfig;
use crate::framework::{LifecycleComponent, LifecycleError, ProgressMonitor};
use crate::server_manager::ServerManager;

pub struct ConnectionServerManager {
    settings: ConnectionConfig,
}

impl ConnectionServerManager {
    pub fn new(settings: ConnectionConfig) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl LifecycleComponent for ConnectionServerManager {
    fn name(&self) -> String {
        "Connection server manager".to_string()
    }

    async fn initialize(&mut self, monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        if self.settings.hostname.trim().is_empty() {
            return Err(LifecycleError::InvalidConfiguration(
                "hostname must not be empty".into(),
            ));
        }
        if self.settings.port == 0 {
            return Err(LifecycleError::InvalidConfiguration(
                "port must be non-zero".into(),
            ));
        }
        monitor.report_progress(&format!("Validated connection to {}", self.endpoint()));
        Ok(())
    }

    async fn start(&mut self, _monitor: &dyn ProgressMonitor) -> Result<(), LifecycleError> {
        info!(endpoint = %self.endpoint(), "Targeting instance");
        Ok(())
    }
}

impl ServerManager for ConnectionServerManager {
    fn endpoint(&self) -> String {
        format!(
            "{}@{}:{}",
            self.settings.tenant, self.settings.hostname, self.settings.port
        )
    }
}
