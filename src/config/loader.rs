//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::error::ConfigurationError;
use crate::config::schema::NodeConfig;
use crate::config::validation::validate_config;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<NodeConfig, ConfigurationError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigurationError::SourceMissing(path.display().to_string()),
        _ => ConfigurationError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<NodeConfig, ConfigurationError> {
    let config: NodeConfig =
        toml::from_str(content).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;

    validate_config(&config).map_err(ConfigurationError::Invalid)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AgentConfig, AgentFailurePolicy, ComponentConfig};

    const SAMPLE: &str = r#"
        [node]
        name = "Bench Node"
        agent_failure_policy = "isolate"

        [components.server-manager]
        type = "connection"
        hostname = "localhost"
        port = 9000

        [components.agent-manager]
        type = "agent-pool"

        [[components.agent-manager.agents]]
        type = "interval"
        name = "agent-a"
        interval_ms = 250
        events = 10

        [[components.agent-manager.agents]]
        type = "interval"
        name = "agent-b"
    "#;

    #[test]
    fn test_parses_components_and_settings() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.node.name, "Bench Node");
        assert_eq!(config.node.agent_failure_policy, AgentFailurePolicy::Isolate);

        match &config.components["server-manager"] {
            ComponentConfig::Connection(connection) => {
                assert_eq!(connection.hostname, "localhost");
                assert_eq!(connection.port, 9000);
                assert_eq!(connection.tenant, "default");
            }
            other => panic!("unexpected component {:?}", other),
        }

        let ComponentConfig::AgentPool(pool) = &config.components["agent-manager"] else {
            panic!("agent-manager should be an agent pool");
        };
        let names: Vec<&str> = pool.agents.iter().map(AgentConfig::name).collect();
        assert_eq!(names, vec!["agent-a", "agent-b"]);
        let AgentConfig::Interval(second) = &pool.agents[1];
        assert_eq!(second.interval_ms, 1000);
        assert_eq!(second.events, 0);
    }

    #[test]
    fn test_defaults_apply_to_empty_file() {
        let config = parse_config("").unwrap();

        assert_eq!(config.node.name, "Load Test Node");
        assert_eq!(config.node.agent_failure_policy, AgentFailurePolicy::FailFast);
        assert!(config.components.is_empty());
    }

    #[test]
    fn test_unknown_component_type_is_malformed() {
        let err = parse_config("[components.server-manager]\ntype = \"carrier-pigeon\"\n").unwrap_err();

        assert!(matches!(err, ConfigurationError::Malformed(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected_while_parsing() {
        let err = parse_config(
            "[components.agent-manager]\ntype = \"agent-pool\"\n\n\
             [[components.agent-manager.agents]]\ntype = \"interval\"\nname = \"a\"\ninterval_ms = 0\n",
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::Invalid(vec![
                "agent 'a' must have interval_ms greater than 0".into()
            ])
        );
    }

    #[test]
    fn test_missing_file_is_source_missing() {
        let err = load_config(Path::new("/definitely/not/here/loadtest.toml")).unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::SourceMissing("/definitely/not/here/loadtest.toml".into())
        );
    }
}
