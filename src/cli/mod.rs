//! CLI argument parsing for relay.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Relay: hierarchical agent delegation for agentic coding pipelines.
///
/// Roles are built from layered configuration:
/// - `~/.config/relay/config.yaml` (user layer)
/// - `.relay/config.yaml` in the project (project layer, wins)
/// - `prompts/<role>.md` and `prompts/<role>_append.md` beside either
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for relay.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the agent config record handed to the host.
    ///
    /// One entry per enabled role, keyed by role name, with the resolved
    /// model, prompt, temperature, permissions, integrations, and mode.
    Agents(AgentsArgs),

    /// Print who may delegate to whom.
    ///
    /// Lists every enabled role with the roles it may launch as
    /// background tasks under the current config.
    Policy(PolicyArgs),
}

/// Output format for machine-readable commands.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `agents` command.
#[derive(Parser, Debug)]
pub struct AgentsArgs {
    /// Read this config file instead of discovering the user and project layers.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the `policy` command.
#[derive(Parser, Debug)]
pub struct PolicyArgs {
    /// Read this config file instead of discovering the user and project layers.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
