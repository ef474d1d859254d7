//! Tests for config functionality.

use crate::agent::{AgentConfig, AgentDefinition, AgentRole};
use crate::config::resolve::inheritance_chain;
use crate::config::{
    AgentOverride, Config, UntrackedSessionPolicy, apply_overrides, default_model, resolve_model,
};
use serial_test::serial;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn make_definition(prompt: &str) -> AgentDefinition {
    AgentDefinition {
        name: AgentRole::Fixer,
        description: "test".to_string(),
        config: AgentConfig {
            model: "base/model".to_string(),
            prompt: prompt.to_string(),
            temperature: Some(0.7),
            permission: BTreeMap::new(),
        },
    }
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert!(config.agents.is_empty());
    assert!(!config.granular_fixers_enabled());
    assert_eq!(config.untracked_session_policy(), UntrackedSessionPolicy::Primary);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
agents:
  explorer:
    model: test/explorer
    temperature: 0.1
    skills: [git]
  oracle:
    prompt_append: "Be brief."
disabled_agents: [designer]
experimental:
  granular_fixers: true
untracked_sessions: deny
"#;
    let config = Config::from_yaml(yaml).unwrap();

    let explorer = config.override_for(AgentRole::Explorer).unwrap();
    assert_eq!(explorer.model.as_deref(), Some("test/explorer"));
    assert_eq!(explorer.temperature, Some(0.1));
    assert_eq!(config.skills_for(AgentRole::Explorer), Some(&["git".to_string()][..]));
    assert!(config.is_disabled(AgentRole::Designer));
    assert!(config.granular_fixers_enabled());
    assert_eq!(config.untracked_session_policy(), UntrackedSessionPolicy::Deny);
}

#[test]
fn test_parse_json_with_camel_case_flag() {
    let json = r#"{"experimental": {"granularFixers": true}, "agents": {"fixer": {"model": "x/y"}}}"#;
    let config = Config::from_yaml(json).unwrap();
    assert!(config.granular_fixers_enabled());
    assert_eq!(resolve_model(AgentRole::Fixer, &config), "x/y");
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
future_setting: true
agents:
  fixer:
    model: a/b
    future_field: 1
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(resolve_model(AgentRole::Fixer, &config), "a/b");
}

#[test]
fn test_temperature_out_of_range_fails() {
    let yaml = r#"
agents:
  oracle:
    temperature: 3.5
"#;
    let err = Config::from_yaml(yaml).unwrap_err().to_string();
    assert!(err.contains("temperature"));
    assert!(err.contains("oracle"));
}

#[test]
fn test_disabling_primary_fails() {
    let yaml = "disabled_agents: [orchestrator]";
    let err = Config::from_yaml(yaml).unwrap_err().to_string();
    assert!(err.contains("cannot be disabled"));
}

#[test]
fn test_unknown_agent_key_is_not_an_error() {
    let yaml = r#"
agents:
  not-a-role:
    model: x/y
disabled_agents: [also-not-a-role]
"#;
    assert!(Config::from_yaml(yaml).is_ok());
}

#[test]
fn test_invalid_yaml_fails() {
    let err = Config::from_yaml("agents: [unclosed").unwrap_err().to_string();
    assert!(err.contains("failed to parse config YAML"));
}

#[test]
fn test_yaml_round_trip() {
    let yaml = r#"
agents:
  librarian:
    model: lib/model
experimental:
  granular_fixers: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(config, reparsed);
}

// ============================================================================
// Model resolution
// ============================================================================

#[test]
fn test_every_role_resolves_without_config() {
    let config = Config::default();
    for role in AgentRole::ALL {
        assert!(!resolve_model(role, &config).is_empty(), "{} has no model", role);
    }
}

#[test]
fn test_explicit_override_wins() {
    let config = Config::from_yaml("agents: { oracle: { model: custom/oracle } }").unwrap();
    assert_eq!(resolve_model(AgentRole::Oracle, &config), "custom/oracle");
}

#[test]
fn test_legacy_alias_applies() {
    let config = Config::from_yaml(
        r#"
agents:
  explore: { model: test/old-explore-model }
  frontend-ui-ux-engineer: { model: test/old-frontend-model }
"#,
    )
    .unwrap();
    assert_eq!(resolve_model(AgentRole::Explorer, &config), "test/old-explore-model");
    assert_eq!(resolve_model(AgentRole::Designer, &config), "test/old-frontend-model");
}

#[test]
fn test_new_name_beats_legacy_alias() {
    let config = Config::from_yaml(
        r#"
agents:
  explore: { model: old-model }
  explorer: { model: new-model }
"#,
    )
    .unwrap();
    assert_eq!(resolve_model(AgentRole::Explorer, &config), "new-model");
}

#[test]
fn test_fixer_inherits_librarian_model() {
    let config = Config::from_yaml("agents: { librarian: { model: librarian-custom } }").unwrap();
    assert_eq!(resolve_model(AgentRole::Fixer, &config), "librarian-custom");
}

#[test]
fn test_fixer_explicit_model_beats_inheritance() {
    let config = Config::from_yaml(
        r#"
agents:
  librarian: { model: librarian-model }
  fixer: { model: fixer-model }
"#,
    )
    .unwrap();
    assert_eq!(resolve_model(AgentRole::Fixer, &config), "fixer-model");
}

#[test]
fn test_granular_inheritance_order() {
    // Base override first
    let config = Config::from_yaml(
        r#"
agents:
  fixer: { model: fixer-model }
  librarian: { model: librarian-model }
"#,
    )
    .unwrap();
    assert_eq!(resolve_model(AgentRole::QuickFixer, &config), "fixer-model");

    // Then the fallback role's override
    let config = Config::from_yaml("agents: { librarian: { model: librarian-model } }").unwrap();
    assert_eq!(resolve_model(AgentRole::LongFixer, &config), "librarian-model");

    // Then the fallback role's default
    assert_eq!(
        resolve_model(AgentRole::LongFixer, &Config::default()),
        default_model(AgentRole::Librarian)
    );
}

#[test]
fn test_granular_explicit_model_wins() {
    let config = Config::from_yaml(
        r#"
agents:
  fixer: { model: fixer-model }
  quick-fixer: { model: quick-model }
"#,
    )
    .unwrap();
    assert_eq!(resolve_model(AgentRole::QuickFixer, &config), "quick-model");
    assert_eq!(resolve_model(AgentRole::LongFixer, &config), "fixer-model");
}

#[test]
fn test_empty_model_falls_through() {
    let config = Config::from_yaml(r#"agents: { oracle: { model: "" } }"#).unwrap();
    assert_eq!(resolve_model(AgentRole::Oracle, &config), default_model(AgentRole::Oracle));
}

#[test]
fn test_inheritance_chains() {
    assert_eq!(inheritance_chain(AgentRole::Oracle), vec![AgentRole::Oracle]);
    assert_eq!(
        inheritance_chain(AgentRole::Fixer),
        vec![AgentRole::Fixer, AgentRole::Librarian]
    );
    assert_eq!(
        inheritance_chain(AgentRole::QuickFixer),
        vec![AgentRole::QuickFixer, AgentRole::Fixer, AgentRole::Librarian]
    );
}

// ============================================================================
// Override application
// ============================================================================

#[test]
fn test_apply_overrides_zero_temperature() {
    let mut def = make_definition("Base prompt");
    apply_overrides(
        &mut def,
        &AgentOverride {
            temperature: Some(0.0),
            ..Default::default()
        },
    );
    assert_eq!(def.config.temperature, Some(0.0));
}

#[test]
fn test_apply_overrides_absent_fields_keep_values() {
    let mut def = make_definition("Base prompt");
    apply_overrides(&mut def, &AgentOverride::default());
    assert_eq!(def.config.model, "base/model");
    assert_eq!(def.config.temperature, Some(0.7));
    assert_eq!(def.config.prompt, "Base prompt");
}

#[test]
fn test_apply_overrides_append_keeps_base() {
    let mut def = make_definition("Base prompt");
    apply_overrides(
        &mut def,
        &AgentOverride {
            prompt_append: Some("Extra rules".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(def.config.prompt, "Base prompt\n\nExtra rules");
}

#[test]
fn test_apply_overrides_replacement_then_append() {
    let mut def = make_definition("Base prompt");
    apply_overrides(
        &mut def,
        &AgentOverride {
            model: Some("new/model".to_string()),
            prompt: Some("Replaced".to_string()),
            prompt_append: Some("Extra".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(def.config.model, "new/model");
    assert_eq!(def.config.prompt, "Replaced\n\nExtra");
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_merge_overlay_wins_per_field() {
    let user = Config::from_yaml(
        r#"
agents:
  oracle: { model: user/oracle, temperature: 0.2 }
disabled_agents: [designer]
experimental: { granular_fixers: true }
"#,
    )
    .unwrap();
    let project = Config::from_yaml(
        r#"
agents:
  oracle: { model: project/oracle }
disabled_agents: [oracle]
"#,
    )
    .unwrap();

    let merged = user.merge(project);
    let oracle = merged.override_for(AgentRole::Oracle).unwrap();
    assert_eq!(oracle.model.as_deref(), Some("project/oracle"));
    assert_eq!(oracle.temperature, Some(0.2));
    assert!(merged.is_disabled(AgentRole::Designer));
    assert!(merged.is_disabled(AgentRole::Oracle));
    assert!(merged.granular_fixers_enabled());
}

#[test]
fn test_load_missing_file_returns_none() {
    let temp = TempDir::new().unwrap();
    assert!(Config::load(temp.path().join("config.yaml")).unwrap().is_none());
}

#[test]
#[serial]
fn test_discover_layers_user_then_project() {
    let user_home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let user_dir = user_home.path().join("relay");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.yaml"),
        "agents: { librarian: { model: user/lib }, oracle: { model: user/oracle } }",
    )
    .unwrap();

    let project_dir = project.path().join(".relay");
    std::fs::create_dir_all(&project_dir).unwrap();
    std::fs::write(
        project_dir.join("config.yaml"),
        "agents: { oracle: { model: project/oracle } }",
    )
    .unwrap();

    let _env = crate::test_support::EnvGuard::set("XDG_CONFIG_HOME", user_home.path());
    let config = Config::discover(project.path()).unwrap();

    assert_eq!(resolve_model(AgentRole::Librarian, &config), "user/lib");
    assert_eq!(resolve_model(AgentRole::Oracle, &config), "project/oracle");
}
