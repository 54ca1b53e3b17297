//! Configuration validation.
//!
//! Serde handles the syntax; this module checks what serde cannot: names are present
//! and unique, intervals are usable. Every problem is reported, not just the first.

use std::collections::HashSet;

use crate::config::schema::{AgentConfig, ComponentConfig, NodeConfig};

/// Returns every semantic problem found in `config`.
pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut agent_names = HashSet::new();

    for (name, component) in &config.components {
        if name.trim().is_empty() {
            errors.push("component names must not be empty".to_string());
        }
        let ComponentConfig::AgentPool(pool) = component else {
            continue;
        };
        for agent in &pool.agents {
            if agent.name().trim().is_empty() {
                errors.push(format!("agent in '{}' has an empty name", name));
            } else if !agent_names.insert(agent.name().to_string()) {
                errors.push(format!("duplicate agent name '{}'", agent.name()));
            }
            match agent {
                AgentConfig::Interval(interval) if interval.interval_ms == 0 => {
                    errors.push(format!(
                        "agent '{}' must have interval_ms greater than 0",
                        interval.name
                    ));
                }
                AgentConfig::Interval(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
