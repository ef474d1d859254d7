//! Config struct definition.

use super::types::{AgentOverride, ExperimentalFlags, UntrackedSessionPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the agent roster.
///
/// This struct represents `config.yaml` from either the user layer or the
/// project layer. Unknown fields in the YAML are ignored for forward
/// compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-role overrides keyed by role name or legacy alias.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub agents: BTreeMap<String, AgentOverride>,

    /// Subagent roles removed from the roster entirely.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled_agents: Vec<String>,

    /// Experimental feature flags.
    pub experimental: ExperimentalFlags,

    /// Authorization of sessions this process never launched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untracked_sessions: Option<UntrackedSessionPolicy>,
}
