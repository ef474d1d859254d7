//! Configuration types and defaults for relay.

use crate::agent::AgentRole;
use serde::{Deserialize, Serialize};

/// Directory holding project-level relay files, relative to the project root.
pub const PROJECT_DIR: &str = ".relay";

/// Directory name under the user's config home.
pub const APP_DIR: &str = "relay";

/// Configuration file name inside either layer.
pub const CONFIG_FILE: &str = "config.yaml";

/// Per-role override block under `agents:`.
///
/// Every field is optional; absence means "keep what the role would
/// otherwise get", which is distinct from an explicit zero temperature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverride {
    /// Model identifier, e.g. `provider/model`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Full replacement for the role's prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Fragment appended after the resolved prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_append: Option<String>,

    /// Explicit skill allowlist for the role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,

    /// Auxiliary integrations (MCP servers) the role may use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcps: Option<Vec<String>>,
}

impl AgentOverride {
    /// Layer `overlay` on top of `self`, field by field.
    pub fn merged_with(&self, overlay: &AgentOverride) -> AgentOverride {
        AgentOverride {
            model: overlay.model.clone().or_else(|| self.model.clone()),
            temperature: overlay.temperature.or(self.temperature),
            prompt: overlay.prompt.clone().or_else(|| self.prompt.clone()),
            prompt_append: overlay
                .prompt_append
                .clone()
                .or_else(|| self.prompt_append.clone()),
            skills: overlay.skills.clone().or_else(|| self.skills.clone()),
            mcps: overlay.mcps.clone().or_else(|| self.mcps.clone()),
        }
    }
}

/// Experimental feature flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalFlags {
    /// Enable the `quick-fixer` and `long-fixer` variants.
    #[serde(alias = "granularFixers", skip_serializing_if = "Option::is_none")]
    pub granular_fixers: Option<bool>,
}

/// How to treat a caller whose session was never launched by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UntrackedSessionPolicy {
    /// Authorize as the primary role (top-level sessions).
    #[default]
    Primary,
    /// Authorize with an empty allowed set.
    Deny,
}

/// Built-in model for a role.
///
/// Implementation roles share the librarian's default so that inheritance
/// through `fixer` lands on the same value either way.
pub fn default_model(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Orchestrator => "anthropic/claude-opus-4-5",
        AgentRole::Oracle => "openai/gpt-5.1",
        AgentRole::Librarian => "google/gemini-2.5-flash",
        AgentRole::Explorer => "cerebras/zai-glm-4.6",
        AgentRole::Designer => "google/gemini-2.5-pro",
        AgentRole::Fixer | AgentRole::QuickFixer | AgentRole::LongFixer => {
            default_model(AgentRole::Librarian)
        }
    }
}
