//! Configuration model for relay.
//!
//! This module defines the `config.yaml` format (per-role overrides, disabled
//! roles, experimental flags), the user/project layering, and the resolver
//! that turns a config into an effective model and prompt for each role.

mod model;
mod operations;
pub mod resolve;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use operations::user_config_dir;
pub use resolve::{apply_overrides, resolve_model};
pub use types::{AgentOverride, ExperimentalFlags, UntrackedSessionPolicy, default_model};
