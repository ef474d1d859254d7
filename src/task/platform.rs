//! The external execution platform.
//!
//! The platform owns sessions: it creates them, runs prompts in them, and
//! reports when they go idle or fail. A finished session's transcript holds
//! the delegated agent's answer. Relay only talks to the platform through
//! [`SessionPlatform`].

use crate::agent::AgentRole;
use async_trait::async_trait;
use thiserror::Error;

/// Error reported by the platform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct PlatformError(pub String);

/// Parameters for a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Session the new one is a child of.
    pub parent_id: String,
    /// Display title.
    pub title: String,
}

/// State of a session as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Still working.
    Busy,
    /// Finished its last prompt.
    Idle,
    /// Stopped with an error.
    Error(String),
}

/// Author of a session message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One message of a session transcript, reduced to its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMessage {
    pub role: MessageRole,
    pub text: String,
}

impl SessionMessage {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }
}

/// What happened to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventKind {
    Idle,
    Error(String),
}

/// A terminal notification pushed by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub session_id: String,
    pub kind: SessionEventKind,
}

/// Session operations the task manager needs from the platform.
#[async_trait]
pub trait SessionPlatform: Send + Sync {
    /// Create a session and return its identifier.
    async fn create_session(&self, request: &SessionRequest) -> Result<String, PlatformError>;

    /// Send `prompt` to `session_id`, to be run as `agent`.
    async fn send_prompt(
        &self,
        session_id: &str,
        agent: AgentRole,
        prompt: &str,
    ) -> Result<(), PlatformError>;

    /// Current state of `session_id`.
    async fn session_state(&self, session_id: &str) -> Result<SessionState, PlatformError>;

    /// Transcript of `session_id`, oldest first.
    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<SessionMessage>, PlatformError>;
}
