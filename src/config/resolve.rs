//! Model resolution and override application.
//!
//! Resolution walks an ordered inheritance chain and never mutates the
//! config, so each step can be tested on its own:
//!
//! 1. the role's own override (role name, then legacy alias)
//! 2. for granular variants, the base role's override
//! 3. the base role's model fallback (e.g. `fixer` → `librarian`)
//! 4. the built-in default of the last role in the chain

use super::model::Config;
use super::types::{AgentOverride, default_model};
use crate::agent::{AgentDefinition, AgentRole};

/// Separator between a base prompt and an appended fragment.
pub const PROMPT_APPEND_SEPARATOR: &str = "\n\n";

/// Roles consulted, in order, when resolving `role`'s model.
pub fn inheritance_chain(role: AgentRole) -> Vec<AgentRole> {
    let mut chain = vec![role];
    let mut current = role.granular_base().unwrap_or(role);
    if current != role {
        chain.push(current);
    }
    while let Some(next) = current.model_fallback() {
        chain.push(next);
        current = next;
    }
    chain
}

/// Effective model for `role`. Always returns a non-empty identifier.
pub fn resolve_model(role: AgentRole, config: &Config) -> String {
    let chain = inheritance_chain(role);

    chain
        .iter()
        .find_map(|link| {
            config
                .override_for(*link)
                .and_then(|o| o.model.as_deref())
                .filter(|model| !model.is_empty())
        })
        .unwrap_or_else(|| {
            let terminus = chain.last().copied().unwrap_or(role);
            default_model(terminus)
        })
        .to_string()
}

/// Apply an override block to a definition.
///
/// `temperature` is applied whenever present, including `0.0`. A
/// `prompt_append` fragment is concatenated after whichever prompt is in
/// place once the replacement (if any) has been applied.
pub fn apply_overrides(definition: &mut AgentDefinition, agent_override: &AgentOverride) {
    if let Some(model) = agent_override.model.as_deref().filter(|m| !m.is_empty()) {
        definition.config.model = model.to_string();
    }
    if let Some(temperature) = agent_override.temperature {
        definition.config.temperature = Some(temperature);
    }
    if let Some(prompt) = agent_override.prompt.as_deref().filter(|p| !p.is_empty()) {
        definition.config.prompt = prompt.to_string();
    }
    if let Some(append) = agent_override
        .prompt_append
        .as_deref()
        .filter(|a| !a.is_empty())
    {
        append_prompt(&mut definition.config.prompt, append);
    }
}

/// Append `fragment` to `prompt` with a blank-line separator.
pub fn append_prompt(prompt: &mut String, fragment: &str) {
    prompt.push_str(PROMPT_APPEND_SEPARATOR);
    prompt.push_str(fragment);
}
