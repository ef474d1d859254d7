//! Config loading, layering, validation, and lookup operations.

use super::model::Config;
use super::types::{APP_DIR, AgentOverride, CONFIG_FILE, PROJECT_DIR, UntrackedSessionPolicy};
use crate::agent::AgentRole;
use crate::error::{RelayError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content).map_err(|e| {
            RelayError::UserError(format!("{} (in '{}')", e, path.display()))
        })?;
        debug!(path = %path.display(), "loaded config layer");
        Ok(Some(config))
    }

    /// Parse config from a YAML (or JSON) string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RelayError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RelayError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - temperatures must be finite and within `0.0..=2.0`
    /// - the primary role cannot be disabled
    ///
    /// Unknown agent keys and unknown disabled names only produce warnings.
    pub fn validate(&self) -> Result<()> {
        for (key, agent) in &self.agents {
            if let Some(temperature) = agent.temperature
                && !(temperature.is_finite() && (0.0..=2.0).contains(&temperature))
            {
                return Err(RelayError::UserError(format!(
                    "config validation failed: agent '{}' has temperature {} (expected 0.0 to 2.0)",
                    key, temperature
                )));
            }

            if !is_known_agent_key(key) {
                warn!(agent = %key, "config names an unknown agent; ignoring its overrides");
            }
        }

        for name in &self.disabled_agents {
            match AgentRole::from_name(name) {
                Some(role) if role.is_primary() => {
                    return Err(RelayError::UserError(format!(
                        "config validation failed: '{}' is the primary agent and cannot be disabled",
                        name
                    )));
                }
                Some(_) => {}
                None => warn!(agent = %name, "disabled_agents names an unknown agent"),
            }
        }

        Ok(())
    }

    /// Layer `overlay` on top of `self`.
    ///
    /// Agent overrides merge field by field with the overlay winning,
    /// disabled agents are unioned, and scalar settings from the overlay win
    /// when set.
    pub fn merge(mut self, overlay: Config) -> Config {
        for (key, agent) in overlay.agents {
            let merged = match self.agents.get(&key) {
                Some(base) => base.merged_with(&agent),
                None => agent,
            };
            self.agents.insert(key, merged);
        }

        for name in overlay.disabled_agents {
            if !self.disabled_agents.contains(&name) {
                self.disabled_agents.push(name);
            }
        }

        if overlay.experimental.granular_fixers.is_some() {
            self.experimental.granular_fixers = overlay.experimental.granular_fixers;
        }

        if overlay.untracked_sessions.is_some() {
            self.untracked_sessions = overlay.untracked_sessions;
        }

        self
    }

    /// Load and merge the user layer and the project layer.
    ///
    /// Missing files are skipped; the result is the default config if
    /// neither layer exists.
    pub fn discover(project_dir: &Path) -> Result<Self> {
        let mut config = Config::default();

        if let Some(user_dir) = user_config_dir()
            && let Some(user) = Config::load(user_dir.join(APP_DIR).join(CONFIG_FILE))?
        {
            config = config.merge(user);
        }

        if let Some(project) = Config::load(project_dir.join(PROJECT_DIR).join(CONFIG_FILE))? {
            config = config.merge(project);
        }

        Ok(config)
    }

    /// Override block for `role`.
    ///
    /// The key equal to the role name wins over the role's legacy alias.
    pub fn override_for(&self, role: AgentRole) -> Option<&AgentOverride> {
        self.agents.get(role.name()).or_else(|| {
            role.legacy_alias()
                .and_then(|alias| self.agents.get(alias))
        })
    }

    /// Whether `role` is listed in `disabled_agents`.
    ///
    /// The primary role is never disabled.
    pub fn is_disabled(&self, role: AgentRole) -> bool {
        role.is_subagent() && self.disabled_agents.iter().any(|name| name == role.name())
    }

    /// Whether the granular fixer variants are enabled.
    pub fn granular_fixers_enabled(&self) -> bool {
        self.experimental.granular_fixers.unwrap_or(false)
    }

    /// Effective policy for untracked caller sessions.
    pub fn untracked_session_policy(&self) -> UntrackedSessionPolicy {
        self.untracked_sessions.unwrap_or_default()
    }

    /// Explicit skill allowlist for `role`, if configured.
    pub fn skills_for(&self, role: AgentRole) -> Option<&[String]> {
        self.override_for(role)
            .and_then(|o| o.skills.as_deref())
    }
}

/// The user's configuration home: `$XDG_CONFIG_HOME`, else `~/.config`.
pub fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")),
    }
}

fn is_known_agent_key(key: &str) -> bool {
    AgentRole::from_name(key).is_some()
        || AgentRole::ALL
            .into_iter()
            .any(|role| role.legacy_alias() == Some(key))
}
