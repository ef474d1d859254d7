//! Background task records and their manager.
//!
//! A background task is one delegated unit of work running in its own
//! session on the external execution platform. The manager creates the
//! record synchronously and fills in the session identifier later, once the
//! platform answers.
//!
//! # Lifecycle
//!
//! ```text
//! pending ──session created──▶ running ──idle (after prompt)──▶ completed
//!    │                            │
//!    └──session request failed──▶ failed ◀──error──┘
//! ```
//!
//! Terminal states never change again.

use crate::agent::AgentRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod manager;
mod mutations;
pub mod platform;

pub use manager::{BackgroundTaskManager, SessionIndex, TaskHandle};
pub use platform::{
    MessageRole, PlatformError, SessionEvent, SessionEventKind, SessionMessage, SessionPlatform,
    SessionRequest, SessionState,
};

/// Prefix of every generated task identifier.
pub const TASK_ID_PREFIX: &str = "bg_";

/// Status of a background task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created; the session request is in flight.
    Pending,
    /// Session assigned; the agent is working.
    Running,
    /// The session went idle after running.
    Completed,
    /// Session creation, prompting, or the session itself failed.
    Failed,
}

impl TaskStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A request to launch a background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Role the new session runs under.
    pub agent: AgentRole,
    /// Prompt sent to the new session.
    pub prompt: String,
    /// Short human-readable summary.
    pub description: String,
    /// Session that issued the delegation.
    pub parent_session_id: String,
}

/// Snapshot of a background task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundTask {
    /// Manager-generated identifier (`bg_` + 8 hex characters).
    pub id: String,
    pub agent: AgentRole,
    pub prompt: String,
    pub description: String,
    pub parent_session_id: String,

    /// Assigned by the platform; absent until the session exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    pub status: TaskStatus,

    /// Failure reason, set only when `status` is failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Set once the platform accepted the prompt. Idle reports before
    /// that describe an empty session, not finished work.
    #[serde(default)]
    pub prompt_sent: bool,

    /// Assistant output collected after completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    pub launched_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Generate a fresh task identifier.
pub fn generate_task_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", TASK_ID_PREFIX, &uuid[..8])
}
