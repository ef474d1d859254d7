//! Implementation of the `relay policy` command.

use super::{build_registry, current_dir, load_config};
use crate::cli::PolicyArgs;
use relay::agent::AgentRegistry;
use relay::config::{Config, UntrackedSessionPolicy};
use relay::error::Result;

/// Print each enabled role with the roles it may delegate to.
pub fn cmd_policy(args: PolicyArgs) -> Result<()> {
    let project_dir = current_dir()?;
    let config = load_config(args.config.as_deref(), &project_dir)?;
    let registry = build_registry(&config, &project_dir);

    print!("{}", render(&registry, &config));
    Ok(())
}

fn render(registry: &AgentRegistry, config: &Config) -> String {
    let roles = registry.enabled_roles();
    let width = roles.iter().map(|r| r.name().len()).max().unwrap_or(0);

    let mut out = String::new();
    for role in roles {
        let targets: Vec<&str> = registry
            .enabled_targets(role)
            .into_iter()
            .map(|r| r.name())
            .collect();
        let targets = if targets.is_empty() {
            "(none)".to_string()
        } else {
            targets.join(", ")
        };
        out.push_str(&format!("{:width$}  -> {}\n", role.name(), targets, width = width));
    }

    let untracked = match config.untracked_session_policy() {
        UntrackedSessionPolicy::Primary => "treated as orchestrator",
        UntrackedSessionPolicy::Deny => "denied",
    };
    out.push_str(&format!("\nUntracked sessions: {}\n", untracked));
    out
}
