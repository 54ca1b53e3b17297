//! Turning an external configuration source into a [`ComponentRegistry`].

use std::path::PathBuf;

use tracing::info;

use crate::config::{load_config, ConfigurationError};
use crate::registry::ComponentRegistry;

/// Produces the component registry the node bootstraps from.
///
/// Any `Fn() -> Result<ComponentRegistry, ConfigurationError>` is a resolver, which is
/// how tests hand a prepared registry to the node.
pub trait ConfigurationResolver: Send + Sync {
    fn resolve(&self) -> Result<ComponentRegistry, ConfigurationError>;
}

impl<F> ConfigurationResolver for F
where
    F: Fn() -> Result<ComponentRegistry, ConfigurationError> + Send + Sync,
{
    fn resolve(&self) -> Result<ComponentRegistry, ConfigurationError> {
        self()
    }
}

/// Resolves the registry from a TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigurationResolver {
    path: PathBuf,
}

impl FileConfigurationResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigurationResolver for FileConfigurationResolver {
    fn resolve(&self) -> Result<ComponentRegistry, ConfigurationError> {
        info!(path = %self.path.display(), "Loading configuration");
        let config = load_config(&self.path)?;
        Ok(ComponentRegistry::from_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeSettings;

    #[test]
    fn test_closure_resolver() {
        let resolver = || {
            let settings = NodeSettings {
                name: "From Closure".into(),
                ..NodeSettings::default()
            };
            Ok::<_, ConfigurationError>(ComponentRegistry::new(settings))
        };

        let registry = resolver.resolve().unwrap();

        assert_eq!(registry.settings().name, "From Closure");
    }

    #[test]
    fn test_file_resolver_reports_missing_file() {
        let resolver = FileConfigurationResolver::new("/no/such/dir/loadtest.toml");

        let err = resolver.resolve().err().unwrap();

        assert!(matches!(err, ConfigurationError::SourceMissing(_)));
    }
}
