//! Delegation policy.
//!
//! A static two-level tree: the orchestrator may hand work to any subagent,
//! implementation roles may only ask the explorer, and the search/reference
//! roles are leaves. Not user-configurable. Names that are not roles never
//! appear in any set.

use super::role::AgentRole;

const ORCHESTRATOR_TARGETS: &[AgentRole] = &AgentRole::SUBAGENTS;
const EXPLORER_ONLY: &[AgentRole] = &[AgentRole::Explorer];
const LEAF: &[AgentRole] = &[];

/// Roles that `role` may delegate to, in canonical order.
pub fn allowed_targets(role: AgentRole) -> &'static [AgentRole] {
    match role {
        AgentRole::Orchestrator => ORCHESTRATOR_TARGETS,
        AgentRole::Designer | AgentRole::Fixer | AgentRole::QuickFixer | AgentRole::LongFixer => {
            EXPLORER_ONLY
        }
        AgentRole::Explorer | AgentRole::Librarian | AgentRole::Oracle => LEAF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_has_broadest_set() {
        let primary = allowed_targets(AgentRole::Orchestrator);
        for role in AgentRole::ALL {
            for target in allowed_targets(role) {
                assert!(primary.contains(target));
            }
        }
    }

    #[test]
    fn test_orchestrator_never_a_target() {
        for role in AgentRole::ALL {
            assert!(!allowed_targets(role).contains(&AgentRole::Orchestrator));
        }
    }

    #[test]
    fn test_leaf_roles_have_empty_sets() {
        assert!(allowed_targets(AgentRole::Explorer).is_empty());
        assert!(allowed_targets(AgentRole::Librarian).is_empty());
        assert!(allowed_targets(AgentRole::Oracle).is_empty());
    }

    #[test]
    fn test_implementation_roles_may_only_search() {
        for role in [
            AgentRole::Designer,
            AgentRole::Fixer,
            AgentRole::QuickFixer,
            AgentRole::LongFixer,
        ] {
            assert_eq!(allowed_targets(role), &[AgentRole::Explorer]);
        }
    }

    #[test]
    fn test_fixer_cannot_reach_oracle() {
        assert!(!allowed_targets(AgentRole::Fixer).contains(&AgentRole::Oracle));
    }
}
