//! Error types for git-wash operations

use thiserror::Error;

use crate::interaction::InteractionError;

/// Core error type for git-wash operations
#[derive(Error, Debug)]
pub enum WashError {
    // === Startup checks (fatal) ===
    /// No directory between the start point and the filesystem root holds a repository
    #[error("Not a git repository (or any of the parent directories).")]
    RepoNotFound,

    /// Staged, unstaged or untracked changes are present
    #[error("Make sure your working tree is clean before attempting to run this script.")]
    WorkingTreeDirty,

    // === Recoverable errors ===
    /// A single git invocation failed or produced no usable output
    #[error("git {command} failed: {reason}")]
    Subprocess { command: String, reason: String },

    /// An interactive prompt could not produce an answer
    #[error("prompt failed: {0}")]
    Prompt(#[from] InteractionError),

    // === Configuration and system errors ===
    /// Configuration file could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WashError {
    /// Stable machine-readable tag for the error
    pub fn kind(&self) -> &'static str {
        match self {
            WashError::RepoNotFound => "repo_does_not_exist",
            WashError::WorkingTreeDirty => "working_tree_is_dirty",
            WashError::Subprocess { .. } => "subprocess_failed",
            WashError::Prompt(_) => "prompt_failed",
            WashError::Config(_) => "config_invalid",
            WashError::Io(_) => "io",
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(WashError::RepoNotFound.kind(), "repo_does_not_exist");
        assert_eq!(WashError::WorkingTreeDirty.kind(), "working_tree_is_dirty");

        let err = WashError::Subprocess {
            command: "cherry".to_string(),
            reason: "exit status 128".to_string(),
        };
        assert_eq!(err.kind(), "subprocess_failed");
        assert_eq!(err.exit_code(), 1);

        let err = WashError::from(InteractionError::NonTty);
        assert_eq!(err.kind(), "prompt_failed");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WashError::RepoNotFound.to_string(),
            "Not a git repository (or any of the parent directories)."
        );
        assert_eq!(
            WashError::WorkingTreeDirty.to_string(),
            "Make sure your working tree is clean before attempting to run this script."
        );

        let err = WashError::Subprocess {
            command: "merge-base".to_string(),
            reason: "no output".to_string(),
        };
        assert_eq!(err.to_string(), "git merge-base failed: no output");
    }
}
