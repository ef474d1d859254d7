//! Implementation of the `relay agents` command.

use super::{build_registry, current_dir, load_config};
use crate::cli::{AgentsArgs, OutputFormat};
use relay::agent::AgentRegistry;
use relay::config::Config;
use relay::error::{RelayError, Result};
use relay::permissions::DefaultIntegrations;

/// Print the host-facing agent config record.
pub fn cmd_agents(args: AgentsArgs) -> Result<()> {
    let project_dir = current_dir()?;
    let config = load_config(args.config.as_deref(), &project_dir)?;
    let registry = build_registry(&config, &project_dir);

    println!("{}", render(&registry, &config, args.format)?);
    Ok(())
}

fn render(registry: &AgentRegistry, config: &Config, format: OutputFormat) -> Result<String> {
    let integrations = DefaultIntegrations::from_config(config);
    let record = registry.as_sdk_config_record(&integrations);

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&record)
            .map_err(|e| RelayError::UserError(format!("failed to serialize agents: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(&record)
            .map_err(|e| RelayError::UserError(format!("failed to serialize agents: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_record_has_every_enabled_role() {
        let config = Config::default();
        let registry = AgentRegistry::from_config(&config);
        let out = render(&registry, &config, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let record = value.as_object().unwrap();
        assert_eq!(record.len(), 6);
        assert_eq!(record["orchestrator"]["mode"], "primary");
        assert_eq!(record["explorer"]["mode"], "subagent");
        assert_eq!(record["librarian"]["mcps"][1], "context7");
        assert!(record["fixer"]["model"].is_string());
    }

    #[test]
    fn yaml_record_parses_back() {
        let config = Config::from_yaml("experimental:\n  granular_fixers: true\n").unwrap();
        let registry = AgentRegistry::from_config(&config);
        let out = render(&registry, &config, OutputFormat::Yaml).unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        let record = value.as_mapping().unwrap();
        assert_eq!(record.len(), 8);
        assert!(record.contains_key("quick-fixer"));
        assert!(record.contains_key("long-fixer"));
    }
}
