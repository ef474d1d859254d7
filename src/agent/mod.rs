//! Agent roles, delegation policy, and roster building.
//!
//! This module provides:
//!
//! - **Role**: the closed set of agent roles and their relationships
//! - **Policy**: which role may delegate to which
//! - **Definition**: per-role factories producing agent definitions
//! - **Prompt**: compiled-in prompts and user prompt files
//! - **Registry**: building the roster from config and exporting it to the host

mod definition;
pub mod policy;
pub mod prompt;
mod registry;
mod role;

// Re-export public API
pub use definition::{AgentConfig, AgentDefinition, AgentFactory, factory};
pub use policy::allowed_targets;
pub use registry::{
    AgentMode, AgentRegistry, DefinitionBuilder, SdkAgentConfig, build_all,
};
pub use role::{AgentRole, is_subagent};
