//! Relay: hierarchical agent delegation for agentic coding pipelines.
//!
//! A primary orchestrator hands work to specialist subagents, each running
//! in its own session on an external execution platform. Relay decides who
//! may delegate to whom, builds each role's definition from layered
//! configuration, and tracks delegated work as background tasks.

pub mod agent;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod permissions;
pub mod task;
pub mod tools;

#[cfg(test)]
mod test_support;
