//! The closed set of agent roles.
//!
//! Roles are a fixed enumeration: one primary coordinator plus the subagents it
//! can hand work to. Two of the subagents (`quick-fixer`, `long-fixer`) are
//! experimental refinements of `fixer` that only exist when the
//! `granular_fixers` flag is on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An agent role.
///
/// Variant order is the canonical output order used by the builder and by
/// every list rendered for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentRole {
    /// Primary coordinator. Delegates broadly, never delegated to.
    Orchestrator,
    /// Pure codebase search. Leaf role.
    Explorer,
    /// Documentation and library reference lookup.
    Librarian,
    /// Architecture review and hard debugging.
    Oracle,
    /// UI/UX implementation.
    Designer,
    /// Fast, well-scoped implementation work.
    Fixer,
    /// Granular fixer variant for tiny edits.
    QuickFixer,
    /// Granular fixer variant for multi-file work.
    LongFixer,
}

impl AgentRole {
    /// Every role, in canonical order.
    pub const ALL: [AgentRole; 8] = [
        AgentRole::Orchestrator,
        AgentRole::Explorer,
        AgentRole::Librarian,
        AgentRole::Oracle,
        AgentRole::Designer,
        AgentRole::Fixer,
        AgentRole::QuickFixer,
        AgentRole::LongFixer,
    ];

    /// Every subagent role, in canonical order.
    pub const SUBAGENTS: [AgentRole; 7] = [
        AgentRole::Explorer,
        AgentRole::Librarian,
        AgentRole::Oracle,
        AgentRole::Designer,
        AgentRole::Fixer,
        AgentRole::QuickFixer,
        AgentRole::LongFixer,
    ];

    /// Wire name of the role.
    pub fn name(self) -> &'static str {
        match self {
            AgentRole::Orchestrator => "orchestrator",
            AgentRole::Explorer => "explorer",
            AgentRole::Librarian => "librarian",
            AgentRole::Oracle => "oracle",
            AgentRole::Designer => "designer",
            AgentRole::Fixer => "fixer",
            AgentRole::QuickFixer => "quick-fixer",
            AgentRole::LongFixer => "long-fixer",
        }
    }

    /// Parse a wire name. Legacy config aliases are not role names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    /// Whether this is the primary role.
    pub fn is_primary(self) -> bool {
        self == AgentRole::Orchestrator
    }

    /// Whether this role is a member of the subagent set.
    pub fn is_subagent(self) -> bool {
        !self.is_primary()
    }

    /// Old configuration key that still maps onto this role.
    pub fn legacy_alias(self) -> Option<&'static str> {
        match self {
            AgentRole::Explorer => Some("explore"),
            AgentRole::Designer => Some("frontend-ui-ux-engineer"),
            _ => None,
        }
    }

    /// Base role of a granular variant.
    pub fn granular_base(self) -> Option<AgentRole> {
        match self {
            AgentRole::QuickFixer | AgentRole::LongFixer => Some(AgentRole::Fixer),
            _ => None,
        }
    }

    /// Whether the role only exists behind the `granular_fixers` flag.
    pub fn is_granular(self) -> bool {
        self.granular_base().is_some()
    }

    /// Role whose configured model this role inherits when it has none.
    pub fn model_fallback(self) -> Option<AgentRole> {
        match self {
            AgentRole::Fixer => Some(AgentRole::Librarian),
            _ => None,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `name` is the wire name of a subagent role.
pub fn is_subagent(name: &str) -> bool {
    AgentRole::from_name(name).is_some_and(AgentRole::is_subagent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for role in AgentRole::ALL {
            assert_eq!(AgentRole::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&AgentRole::QuickFixer).unwrap();
        assert_eq!(json, "\"quick-fixer\"");
        let role: AgentRole = serde_json::from_str("\"long-fixer\"").unwrap();
        assert_eq!(role, AgentRole::LongFixer);
    }

    #[test]
    fn test_is_subagent_for_valid_names() {
        for name in [
            "explorer",
            "librarian",
            "oracle",
            "designer",
            "fixer",
            "long-fixer",
            "quick-fixer",
        ] {
            assert!(is_subagent(name), "{} should be a subagent", name);
        }
    }

    #[test]
    fn test_is_subagent_rejects_primary_and_unknown() {
        assert!(!is_subagent("orchestrator"));
        assert!(!is_subagent("invalid-agent"));
        assert!(!is_subagent(""));
        // Legacy alias, not an actual role name
        assert!(!is_subagent("explore"));
    }

    #[test]
    fn test_subagents_exclude_primary() {
        assert!(!AgentRole::SUBAGENTS.contains(&AgentRole::Orchestrator));
        assert_eq!(AgentRole::SUBAGENTS.len() + 1, AgentRole::ALL.len());
    }

    #[test]
    fn test_granular_variants() {
        assert_eq!(AgentRole::QuickFixer.granular_base(), Some(AgentRole::Fixer));
        assert_eq!(AgentRole::LongFixer.granular_base(), Some(AgentRole::Fixer));
        assert!(!AgentRole::Fixer.is_granular());
    }
}
