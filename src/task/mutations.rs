//! State transitions on a task record.
//!
//! Each helper returns whether the transition was applied. Transitions out
//! of a terminal state, or that would skip `pending`, are refused.

use super::{BackgroundTask, LaunchRequest, TaskStatus};
use chrono::Utc;

impl BackgroundTask {
    /// New pending record for `request`.
    pub fn new(id: String, request: &LaunchRequest) -> Self {
        Self {
            id,
            agent: request.agent,
            prompt: request.prompt.clone(),
            description: request.description.clone(),
            parent_session_id: request.parent_session_id.clone(),
            session_id: None,
            status: TaskStatus::Pending,
            error: None,
            prompt_sent: false,
            result: None,
            launched_at: Utc::now(),
            completed_at: None,
        }
    }

    /// pending → running, recording the platform's session id.
    pub fn assign_session(&mut self, session_id: String) -> bool {
        if self.status != TaskStatus::Pending || self.session_id.is_some() {
            return false;
        }
        self.session_id = Some(session_id);
        self.status = TaskStatus::Running;
        true
    }

    /// Record that the running session accepted its prompt.
    pub fn mark_prompt_sent(&mut self) -> bool {
        if self.status != TaskStatus::Running || self.prompt_sent {
            return false;
        }
        self.prompt_sent = true;
        true
    }

    /// running → completed. Refused until the prompt was delivered.
    pub fn complete(&mut self) -> bool {
        if self.status != TaskStatus::Running || !self.prompt_sent {
            return false;
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        true
    }

    /// pending | running → failed.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        true
    }

    /// Store the collected output of a completed task, once.
    pub fn set_result(&mut self, output: String) -> bool {
        if self.status != TaskStatus::Completed || self.result.is_some() {
            return false;
        }
        self.result = Some(output);
        true
    }
}
