//! The `background_task` delegation tool.

use super::{ToolContext, ToolDefinition, require_session};
use crate::agent::{AgentRegistry, AgentRole};
use crate::config::UntrackedSessionPolicy;
use crate::error::Result;
use crate::task::{BackgroundTaskManager, LaunchRequest, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments of `background_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateArgs {
    /// Target role name.
    pub agent: String,
    /// Full instructions for the target.
    pub prompt: String,
    /// Short summary shown in task listings.
    pub description: String,
}

/// Delegates work to another role, subject to the delegation policy.
pub struct DelegateTool {
    manager: BackgroundTaskManager,
    registry: Arc<AgentRegistry>,
    untracked: UntrackedSessionPolicy,
}

impl DelegateTool {
    pub const NAME: &'static str = "background_task";

    pub fn new(manager: BackgroundTaskManager, registry: Arc<AgentRegistry>) -> Self {
        Self {
            manager,
            registry,
            untracked: UntrackedSessionPolicy::default(),
        }
    }

    /// Set how callers from sessions this process never launched are treated.
    pub fn with_untracked_policy(mut self, policy: UntrackedSessionPolicy) -> Self {
        self.untracked = policy;
        self
    }

    /// Tool declaration; `agent` is limited to the enabled subagents.
    pub fn definition(&self) -> ToolDefinition {
        let agents: Vec<&str> = self
            .registry
            .enabled_subagents()
            .into_iter()
            .map(AgentRole::name)
            .collect();

        let roster = self
            .registry
            .enabled_subagents()
            .into_iter()
            .filter_map(|role| self.registry.get(role))
            .map(|def| format!("- {}: {}", def.name, def.description))
            .collect::<Vec<_>>()
            .join("\n");

        ToolDefinition {
            name: Self::NAME.to_string(),
            description: format!(
                "Launch a specialist agent as a background task. Returns a task ID immediately; \
                 use `background_output` to check on it.\n\nAvailable agents:\n{}",
                roster
            ),
            parameters: json!({
                "type": "object",
                "properties": {
                    "agent": {
                        "type": "string",
                        "enum": agents,
                        "description": "Agent to delegate to",
                    },
                    "prompt": {
                        "type": "string",
                        "description": "Complete instructions for the agent",
                    },
                    "description": {
                        "type": "string",
                        "description": "Short (3-5 word) summary of the task",
                    },
                },
                "required": ["agent", "prompt", "description"],
            }),
        }
    }

    /// Role used to authorize a caller, or `None` when it may delegate to nobody.
    pub fn caller_role(&self, session_id: &str) -> Option<AgentRole> {
        match self.manager.session_role(session_id) {
            Some(role) => Some(role),
            None => {
                debug!(session_id = %session_id, policy = ?self.untracked, "caller session is untracked");
                match self.untracked {
                    UntrackedSessionPolicy::Primary => Some(AgentRole::Orchestrator),
                    UntrackedSessionPolicy::Deny => None,
                }
            }
        }
    }

    /// Roles the caller in `session_id` may delegate to right now.
    pub fn allowed_for(&self, session_id: &str) -> Vec<AgentRole> {
        self.caller_role(session_id)
            .map(|role| self.registry.enabled_targets(role))
            .unwrap_or_default()
    }

    /// Run the tool.
    ///
    /// Fails when the context or its session id is missing, or when an
    /// allowed launch is attempted outside an async runtime. A disallowed
    /// or unknown target yields a rejection message.
    pub fn execute(&self, args: DelegateArgs, ctx: Option<&ToolContext>) -> Result<String> {
        let caller_session = require_session(ctx)?;
        let allowed = self.allowed_for(caller_session);

        let Some(target) = allowed
            .iter()
            .copied()
            .find(|role| role.name() == args.agent)
        else {
            info!(
                caller_session = %caller_session,
                target = %args.agent,
                "delegation rejected"
            );
            return Ok(rejection(&args.agent, &allowed));
        };

        let handle = self.manager.launch(LaunchRequest {
            agent: target,
            prompt: args.prompt,
            description: args.description,
            parent_session_id: caller_session.to_string(),
        })?;

        // The continuation has not run yet when this returns.
        Ok(format!(
            "Background task launched.\n\n\
             Task ID: {id}\n\
             Agent: {agent}\n\
             Status: {status}\n\n\
             Use `background_output` with task_id=\"{id}\" to check progress.",
            id = handle.id(),
            agent = target,
            status = TaskStatus::Pending,
        ))
    }
}

/// Message returned when `target` is not in `allowed`.
pub fn rejection(target: &str, allowed: &[AgentRole]) -> String {
    let names: Vec<&str> = allowed.iter().map(|role| role.name()).collect();
    format!(
        "Agent '{}' is not allowed. Allowed agents: {}",
        target,
        names.join(", ")
    )
}
