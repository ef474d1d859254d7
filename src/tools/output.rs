//! The `background_output` status tool.

use super::{ToolContext, ToolDefinition, require_session};
use crate::error::Result;
use crate::task::{BackgroundTask, BackgroundTaskManager, TaskStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

/// Arguments of `background_output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutputArgs {
    pub task_id: String,
}

/// Reports the state of a task launched by `background_task`.
pub struct TaskOutputTool {
    manager: BackgroundTaskManager,
}

impl TaskOutputTool {
    pub const NAME: &'static str = "background_output";

    pub fn new(manager: BackgroundTaskManager) -> Self {
        Self { manager }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Check the status of a background task launched with `background_task`. \
                          Returns the agent's answer once it has completed."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "task_id": {
                        "type": "string",
                        "description": "Task ID returned by background_task",
                    },
                },
                "required": ["task_id"],
            }),
        }
    }

    /// Refresh the task from the platform and describe it.
    ///
    /// A completed task's description carries the agent's answer. A failed
    /// poll is logged and the last known state is reported.
    pub async fn execute(&self, args: TaskOutputArgs, ctx: Option<&ToolContext>) -> Result<String> {
        let caller_session = require_session(ctx)?;
        debug!(caller_session = %caller_session, task_id = %args.task_id, "checking background task");

        if let Err(e) = self.manager.refresh(&args.task_id).await {
            warn!(task_id = %args.task_id, error = %e, "failed to refresh background task");
        }

        Ok(match self.manager.get(&args.task_id) {
            Some(task) => describe(&task),
            None => format!("Task '{}' not found.", args.task_id),
        })
    }
}

fn describe(task: &BackgroundTask) -> String {
    let end = task.completed_at.unwrap_or_else(Utc::now);
    let elapsed = (end - task.launched_at).num_seconds().max(0);

    let mut out = format!(
        "Task ID: {}\nAgent: {}\nDescription: {}\nStatus: {}\n",
        task.id, task.agent, task.description, task.status
    );
    if let Some(session_id) = &task.session_id {
        out.push_str(&format!("Session: {}\n", session_id));
    }
    out.push_str(&format!("Elapsed: {}s\n", elapsed));

    match task.status {
        TaskStatus::Pending => out.push_str("\nWaiting for a session to be created."),
        TaskStatus::Running => out.push_str("\nStill running. Check again later."),
        TaskStatus::Completed => {
            out.push_str("\nTask completed.");
            match task.result.as_deref() {
                Some("") => out.push_str("\n\nResult: (no output)"),
                Some(result) => out.push_str(&format!("\n\nResult:\n{}", result)),
                None => out.push_str("\n\nResult not collected yet. Check again later."),
            }
        }
        TaskStatus::Failed => {
            out.push_str("\nTask failed");
            if let Some(error) = &task.error {
                out.push_str(&format!(": {}", error));
            }
            out.push('.');
        }
    }
    out
}
