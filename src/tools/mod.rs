//! Tools exposed to agents.
//!
//! - `background_task`: delegate work to another role as a background task
//! - `background_output`: check on a task launched earlier
//!
//! Both are invoked with the caller's execution context. A missing context
//! or session id is an integration error and fails the call; authorization
//! rejections and unknown task ids are returned as plain text.

mod delegate;
mod output;

pub use delegate::{DelegateArgs, DelegateTool};
pub use output::{TaskOutputArgs, TaskOutputTool};

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Execution context the host passes with every tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContext {
    /// Session the calling agent runs in.
    #[serde(rename = "sessionID", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ToolContext {
    pub fn for_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
        }
    }
}

/// Extract the caller's session id, or fail the call.
pub(crate) fn require_session(ctx: Option<&ToolContext>) -> Result<&str> {
    ctx.and_then(|ctx| ctx.session_id.as_deref())
        .filter(|id| !id.is_empty())
        .ok_or(RelayError::MissingSessionContext)
}

/// Declaration of a tool as presented to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

/// Parse raw JSON arguments into a tool's argument struct.
pub fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| RelayError::InvalidArguments(e.to_string()))
}
