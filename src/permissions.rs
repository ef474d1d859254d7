//! Default permissions and per-role integrations.
//!
//! Skill permissions and the list of auxiliary integrations (MCP servers) a
//! role may use are computed by collaborators behind small traits, so hosts
//! can plug in their own policy. The defaults here mirror the stock product
//! behavior.

use crate::agent::{AgentDefinition, AgentRole};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Permission key that lets an agent ask the user clarifying questions.
pub const QUESTION_PERMISSION: &str = "question";

/// Permission key holding the skill pattern map.
pub const SKILL_PERMISSION: &str = "skill";

/// Action taken when a permission is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    Allow,
    Ask,
    Deny,
}

/// A permission entry: either one action, or an action per pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionRule {
    Action(PermissionAction),
    Patterns(BTreeMap<String, PermissionAction>),
}

/// Permission map carried by an agent definition.
pub type PermissionMap = BTreeMap<String, PermissionRule>;

/// Computes skill permissions for a role.
pub trait SkillPermissions {
    /// Skill pattern map for `role_name`, honoring an explicit allowlist when given.
    fn skill_permissions(
        &self,
        role_name: &str,
        configured: Option<&[String]>,
    ) -> BTreeMap<String, PermissionAction>;
}

/// Stock skill policy.
///
/// An explicit allowlist denies everything else. Without one, the
/// orchestrator may use any skill and subagents may use none.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSkillPermissions;

impl SkillPermissions for DefaultSkillPermissions {
    fn skill_permissions(
        &self,
        role_name: &str,
        configured: Option<&[String]>,
    ) -> BTreeMap<String, PermissionAction> {
        let mut map = BTreeMap::new();
        match configured {
            Some(skills) => {
                map.insert("*".to_string(), PermissionAction::Deny);
                for skill in skills {
                    map.insert(skill.clone(), PermissionAction::Allow);
                }
            }
            None if role_name == AgentRole::Orchestrator.name() => {
                map.insert("*".to_string(), PermissionAction::Allow);
            }
            None => {
                map.insert("*".to_string(), PermissionAction::Deny);
            }
        }
        map
    }
}

/// Set `question: allow` and merge in the role's skill permissions.
///
/// Non-skill keys are preserved. The skill map is replaced by the union of
/// the previous skill entries and the newly computed ones, new entries
/// winning on collision.
pub fn apply_default_permissions(
    definition: &mut AgentDefinition,
    skills: &dyn SkillPermissions,
    configured: Option<&[String]>,
) {
    let computed = skills.skill_permissions(definition.name.name(), configured);
    let permission = &mut definition.config.permission;

    let mut merged = match permission.remove(SKILL_PERMISSION) {
        Some(PermissionRule::Patterns(existing)) => existing,
        Some(PermissionRule::Action(action)) => BTreeMap::from([("*".to_string(), action)]),
        None => BTreeMap::new(),
    };
    merged.extend(computed);

    permission.insert(
        QUESTION_PERMISSION.to_string(),
        PermissionRule::Action(PermissionAction::Allow),
    );
    permission.insert(SKILL_PERMISSION.to_string(), PermissionRule::Patterns(merged));
}

/// Computes the auxiliary integrations a role may use.
pub trait IntegrationPolicy {
    fn integrations_for(&self, role: AgentRole) -> Vec<String>;
}

/// Stock integration table, with per-role `mcps` overrides from config.
#[derive(Debug, Clone, Default)]
pub struct DefaultIntegrations {
    overrides: BTreeMap<AgentRole, Vec<String>>,
}

impl DefaultIntegrations {
    /// Build from the `mcps` lists in `config`.
    pub fn from_config(config: &Config) -> Self {
        let overrides = AgentRole::ALL
            .into_iter()
            .filter_map(|role| {
                config
                    .override_for(role)
                    .and_then(|o| o.mcps.clone())
                    .map(|mcps| (role, mcps))
            })
            .collect();
        Self { overrides }
    }

    fn defaults(role: AgentRole) -> &'static [&'static str] {
        match role {
            AgentRole::Orchestrator => &["websearch"],
            AgentRole::Librarian => &["websearch", "context7", "grep_app"],
            _ => &[],
        }
    }
}

impl IntegrationPolicy for DefaultIntegrations {
    fn integrations_for(&self, role: AgentRole) -> Vec<String> {
        match self.overrides.get(&role) {
            Some(mcps) => mcps.clone(),
            None => Self::defaults(role).iter().map(|s| s.to_string()).collect(),
        }
    }
}
