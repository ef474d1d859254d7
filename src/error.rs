//! Error types for relay.
//!
//! Authorization rejections are not errors: the delegation tool returns them
//! as plain strings so the calling agent can read them. Everything here is
//! either a configuration problem or an integration failure.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A tool was invoked without the execution context it requires.
    #[error("Invalid toolContext: missing sessionID")]
    MissingSessionContext,

    /// A tool was invoked with arguments that do not match its schema.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// A background task was launched outside an async runtime.
    #[error("no async runtime available to run background tasks")]
    RuntimeUnavailable,

    /// The external execution platform rejected a request.
    #[error("Platform request failed: {0}")]
    PlatformError(String),
}

impl RelayError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelayError::UserError(_) => exit_codes::USER_ERROR,
            RelayError::MissingSessionContext => exit_codes::INTEGRATION_ERROR,
            RelayError::InvalidArguments(_) => exit_codes::INTEGRATION_ERROR,
            RelayError::RuntimeUnavailable => exit_codes::INTEGRATION_ERROR,
            RelayError::PlatformError(_) => exit_codes::PLATFORM_FAILURE,
        }
    }
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
