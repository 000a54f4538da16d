//! git-wash-core: Branch classification and cleanup
//!
//! This crate holds everything below the command line: the repository handle, the merged
//! and squash-merged classifiers, the selection policy and the washer that sequences them.

/// Core error types for git-wash operations
pub mod error;

/// Configuration file and run options
pub mod config;

/// Repository handle and git execution primitive
pub mod git;

/// Merged and squash-merged branch detection
pub mod classify;

/// Prompt and output abstraction
pub mod interaction;

/// Selection policy
pub mod select;

/// Stage sequencing
pub mod wash;

// Re-exports for convenience
pub use classify::{is_squash_merged, merged_branches, parse_merged_listing, squash_merged_branches};
pub use config::{Config, Flags, RunOptions, WashConfig};
pub use error::WashError;
pub use git::{GitCli, GitOutput, GitRunner, Repository, discover_repo_root};
pub use interaction::{InteractionAdapter, InteractionError, InteractionResult, ProgressHandle};
pub use select::{Mode, apply_protection, confirm_prune, select_branches};
pub use wash::{RepoWasher, Stage, StageOutcome, WashReport};
