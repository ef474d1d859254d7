//! Exit code constants for the relay CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid configuration)
//! - 2: Integration error (malformed tool invocation, missing session context)
//! - 3: Platform failure (the execution platform rejected a request)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid configuration file.
pub const USER_ERROR: i32 = 1;

/// Integration error: the caller broke the tool contract.
pub const INTEGRATION_ERROR: i32 = 2;

/// Platform failure: session creation, prompting, or status polling failed.
pub const PLATFORM_FAILURE: i32 = 3;
