//! Building the agent roster from configuration.
//!
//! # Build Order
//!
//! For every role, in canonical order (orchestrator first):
//!
//! 1. Skip it if it is disabled, or experimental with its flag off
//! 2. Instantiate it from its factory with the resolved model
//! 3. Apply prompt files (replacement, then append)
//! 4. Apply the config override block
//! 5. Apply default permissions with the role's skill allowlist

use super::definition::{AgentConfig, AgentDefinition, factory};
use super::policy::allowed_targets;
use super::prompt::{NoPromptFiles, PromptSource};
use super::role::AgentRole;
use crate::config::resolve::append_prompt;
use crate::config::{Config, apply_overrides, resolve_model};
use crate::permissions::{
    DefaultSkillPermissions, IntegrationPolicy, SkillPermissions, apply_default_permissions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds agent definitions from a config and its collaborators.
pub struct DefinitionBuilder<'a> {
    config: &'a Config,
    prompts: &'a dyn PromptSource,
    skills: &'a dyn SkillPermissions,
}

impl<'a> DefinitionBuilder<'a> {
    /// Builder with no prompt files and the stock skill policy.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            prompts: &NoPromptFiles,
            skills: &DefaultSkillPermissions,
        }
    }

    /// Read prompt files from `prompts`.
    pub fn with_prompts(mut self, prompts: &'a dyn PromptSource) -> Self {
        self.prompts = prompts;
        self
    }

    /// Compute skill permissions with `skills`.
    pub fn with_skills(mut self, skills: &'a dyn SkillPermissions) -> Self {
        self.skills = skills;
        self
    }

    /// Whether `role` is part of the roster under this config.
    pub fn is_enabled(&self, role: AgentRole) -> bool {
        if role.is_granular() && !self.config.granular_fixers_enabled() {
            return false;
        }
        !self.config.is_disabled(role)
    }

    /// Whether any granular variant made it into the roster.
    fn granular_roles_enabled(&self) -> bool {
        AgentRole::ALL
            .into_iter()
            .any(|role| role.is_granular() && self.is_enabled(role))
    }

    /// Build every enabled role, primary first.
    pub fn build_all(&self) -> Vec<AgentDefinition> {
        AgentRole::ALL
            .into_iter()
            .filter(|role| self.is_enabled(*role))
            .map(|role| self.build(role))
            .collect()
    }

    /// Build one role regardless of whether it is enabled.
    pub fn build(&self, role: AgentRole) -> AgentDefinition {
        let experimental = self.granular_roles_enabled();
        let model = resolve_model(role, self.config);
        let mut definition = factory(role)(model, experimental);

        let files = self.prompts.load(role.name());
        if let Some(replacement) = files.replacement {
            definition.config.prompt = replacement;
        }
        if let Some(append) = files.append {
            append_prompt(&mut definition.config.prompt, &append);
        }

        if let Some(agent_override) = self.config.override_for(role) {
            apply_overrides(&mut definition, agent_override);
        }

        apply_default_permissions(&mut definition, self.skills, self.config.skills_for(role));

        debug!(
            agent = %role,
            model = %definition.config.model,
            "built agent definition"
        );
        definition
    }
}

/// Build every enabled role with default collaborators.
pub fn build_all(config: &Config) -> Vec<AgentDefinition> {
    DefinitionBuilder::new(config).build_all()
}

/// How a role is presented to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    Primary,
    Subagent,
}

impl AgentMode {
    pub fn of(role: AgentRole) -> Self {
        if role.is_subagent() {
            AgentMode::Subagent
        } else {
            AgentMode::Primary
        }
    }
}

/// One entry of the host-facing agent config record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkAgentConfig {
    #[serde(flatten)]
    pub config: AgentConfig,
    pub description: String,
    pub mcps: Vec<String>,
    pub mode: AgentMode,
}

/// The built roster. Owns its definitions; immutable once built.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    definitions: Vec<AgentDefinition>,
}

impl AgentRegistry {
    /// Wrap already-built definitions.
    pub fn new(definitions: Vec<AgentDefinition>) -> Self {
        Self { definitions }
    }

    /// Build from `config` with default collaborators.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_all(config))
    }

    /// All definitions, primary first.
    pub fn definitions(&self) -> &[AgentDefinition] {
        &self.definitions
    }

    /// Definition for `role`, if enabled.
    pub fn get(&self, role: AgentRole) -> Option<&AgentDefinition> {
        self.definitions.iter().find(|d| d.name == role)
    }

    /// Whether `role` is in the roster.
    pub fn is_enabled(&self, role: AgentRole) -> bool {
        self.get(role).is_some()
    }

    /// Enabled roles, in canonical order.
    pub fn enabled_roles(&self) -> Vec<AgentRole> {
        self.definitions.iter().map(|d| d.name).collect()
    }

    /// Enabled subagent roles, in canonical order.
    pub fn enabled_subagents(&self) -> Vec<AgentRole> {
        self.enabled_roles()
            .into_iter()
            .filter(|role| role.is_subagent())
            .collect()
    }

    /// Roles `source` may delegate to that are present in this roster.
    pub fn enabled_targets(&self, source: AgentRole) -> Vec<AgentRole> {
        allowed_targets(source)
            .iter()
            .copied()
            .filter(|role| self.is_enabled(*role))
            .collect()
    }

    /// Host-facing config record keyed by role name.
    pub fn as_sdk_config_record(
        &self,
        integrations: &dyn IntegrationPolicy,
    ) -> BTreeMap<String, SdkAgentConfig> {
        self.definitions
            .iter()
            .map(|definition| {
                (
                    definition.name.name().to_string(),
                    SdkAgentConfig {
                        config: definition.config.clone(),
                        description: definition.description.clone(),
                        mcps: integrations.integrations_for(definition.name),
                        mode: AgentMode::of(definition.name),
                    },
                )
            })
            .collect()
    }
}
