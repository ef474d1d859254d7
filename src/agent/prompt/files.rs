//! Prompt files from layered configuration directories.

use crate::config::types::{APP_DIR, PROJECT_DIR};
use crate::config::user_config_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prompt files found for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFiles {
    /// Full replacement for the compiled-in prompt.
    pub replacement: Option<String>,
    /// Fragment appended after the selected prompt.
    pub append: Option<String>,
}

/// Source of user-supplied prompt text.
pub trait PromptSource {
    /// Look up prompt files for the role named `role_name`.
    fn load(&self, role_name: &str) -> PromptFiles;
}

/// A source that never has prompt files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPromptFiles;

impl PromptSource for NoPromptFiles {
    fn load(&self, _role_name: &str) -> PromptFiles {
        PromptFiles::default()
    }
}

/// Reads `<role>.md` and `<role>_append.md` from a list of directories.
///
/// Directories are searched in order; for each file the first directory
/// that contains it wins.
#[derive(Debug, Clone, Default)]
pub struct FsPromptSource {
    dirs: Vec<PathBuf>,
}

impl FsPromptSource {
    /// Search exactly the given directories, highest precedence first.
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Standard layering: `<project>/.relay/prompts`, then the user's
    /// `relay/prompts` under the config home.
    pub fn discover(project_dir: Option<&Path>) -> Self {
        let mut dirs = Vec::new();
        if let Some(project) = project_dir {
            dirs.push(project.join(PROJECT_DIR).join("prompts"));
        }
        if let Some(user) = user_config_dir() {
            dirs.push(user.join(APP_DIR).join("prompts"));
        }
        Self { dirs }
    }

    /// Directories searched, highest precedence first.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn first_readable(&self, file_name: &str) -> Option<String> {
        for dir in &self.dirs {
            let path = dir.join(file_name);
            if !path.is_file() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    debug!(path = %path.display(), "using prompt file");
                    return Some(content);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read prompt file");
                }
            }
        }
        None
    }
}

impl PromptSource for FsPromptSource {
    fn load(&self, role_name: &str) -> PromptFiles {
        PromptFiles {
            replacement: self.first_readable(&format!("{}.md", role_name)),
            append: self.first_readable(&format!("{}_append.md", role_name)),
        }
    }
}
