//! Prompt text for agent roles.
//!
//! This module provides:
//!
//! - **Defaults**: compiled-in descriptions and prompts for every role
//! - **Files**: user-supplied prompt files from layered config directories
//!
//! # Prompt Files
//!
//! For a role named `fixer`, two files are recognized in each layer:
//!
//! ```text
//! fixer.md          # replaces the compiled-in prompt
//! fixer_append.md   # appended after whichever prompt was selected
//! ```

mod defaults;
mod files;

pub use defaults::{default_description, default_prompt};
pub use files::{FsPromptSource, NoPromptFiles, PromptFiles, PromptSource};
