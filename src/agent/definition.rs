//! Agent definitions and per-role factories.

use super::prompt::{default_description, default_prompt};
use super::role::AgentRole;
use crate::permissions::{PermissionAction, PermissionMap, PermissionRule};
use serde::{Deserialize, Serialize};

/// Effective configuration of one agent role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier, e.g. `provider/model`.
    pub model: String,
    /// System prompt.
    pub prompt: String,
    /// Sampling temperature, if the role sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Permission map.
    #[serde(default)]
    pub permission: PermissionMap,
}

/// A fully built agent role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: AgentRole,
    pub description: String,
    pub config: AgentConfig,
}

/// Builds a role's definition from its resolved model and the experimental hint.
pub type AgentFactory = fn(model: String, experimental: bool) -> AgentDefinition;

/// Factory for `role`.
pub fn factory(role: AgentRole) -> AgentFactory {
    match role {
        AgentRole::Orchestrator => create_orchestrator,
        AgentRole::Explorer => create_explorer,
        AgentRole::Librarian => create_librarian,
        AgentRole::Oracle => create_oracle,
        AgentRole::Designer => create_designer,
        AgentRole::Fixer => create_fixer,
        AgentRole::QuickFixer => create_quick_fixer,
        AgentRole::LongFixer => create_long_fixer,
    }
}

fn base_definition(
    role: AgentRole,
    model: String,
    experimental: bool,
    temperature: f64,
) -> AgentDefinition {
    AgentDefinition {
        name: role,
        description: default_description(role, experimental),
        config: AgentConfig {
            model,
            prompt: default_prompt(role, experimental),
            temperature: Some(temperature),
            permission: PermissionMap::new(),
        },
    }
}

/// Deny file edits for roles that only read.
fn read_only(mut definition: AgentDefinition) -> AgentDefinition {
    definition.config.permission.insert(
        "edit".to_string(),
        PermissionRule::Action(PermissionAction::Deny),
    );
    definition
}

fn create_orchestrator(model: String, experimental: bool) -> AgentDefinition {
    base_definition(AgentRole::Orchestrator, model, experimental, 0.1)
}

fn create_explorer(model: String, experimental: bool) -> AgentDefinition {
    read_only(base_definition(AgentRole::Explorer, model, experimental, 0.1))
}

fn create_librarian(model: String, experimental: bool) -> AgentDefinition {
    read_only(base_definition(AgentRole::Librarian, model, experimental, 0.1))
}

fn create_oracle(model: String, experimental: bool) -> AgentDefinition {
    read_only(base_definition(AgentRole::Oracle, model, experimental, 0.1))
}

fn create_designer(model: String, experimental: bool) -> AgentDefinition {
    base_definition(AgentRole::Designer, model, experimental, 0.7)
}

fn create_fixer(model: String, experimental: bool) -> AgentDefinition {
    base_definition(AgentRole::Fixer, model, experimental, 0.2)
}

fn create_quick_fixer(model: String, experimental: bool) -> AgentDefinition {
    base_definition(AgentRole::QuickFixer, model, experimental, 0.1)
}

fn create_long_fixer(model: String, experimental: bool) -> AgentDefinition {
    base_definition(AgentRole::LongFixer, model, experimental, 0.2)
}
