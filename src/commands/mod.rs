//! Command implementations for relay.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the config loading they share.

mod agents;
mod policy;

use crate::cli::Command;
use relay::agent::{AgentRegistry, DefinitionBuilder};
use relay::agent::prompt::FsPromptSource;
use relay::config::Config;
use relay::error::{RelayError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Agents(args) => agents::cmd_agents(args),
        Command::Policy(args) => policy::cmd_policy(args),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        RelayError::UserError(format!("failed to determine current directory: {}", e))
    })
}

/// Load the config named on the command line, or discover the layers
/// for `project_dir`.
fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path)?.ok_or_else(|| {
            RelayError::UserError(format!("config file '{}' not found", path.display()))
        }),
        None => Config::discover(project_dir),
    }
}

/// Build the registry for `project_dir`, reading prompt files from its
/// `.relay/prompts` and the user's prompt directory.
fn build_registry(config: &Config, project_dir: &Path) -> AgentRegistry {
    let prompts = FsPromptSource::discover(Some(project_dir));
    debug!(dirs = ?prompts.dirs(), "prompt directories");
    let definitions = DefinitionBuilder::new(config)
        .with_prompts(&prompts)
        .build_all();
    AgentRegistry::new(definitions)
}
