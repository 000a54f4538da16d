//! User interaction abstraction
//!
//! The washer talks to the user only through [`InteractionAdapter`], which keeps the
//! core free of any terminal library. The CLI crate provides the terminal implementation;
//! tests substitute a scripted one.

use thiserror::Error;

/// Errors raised by an interaction adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// Prompts need an interactive terminal
    #[error("interactive input requires a terminal (use --no-input)")]
    NonTty,

    /// The answer could not be interpreted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Terminal IO failed
    #[error("IO error: {0}")]
    Io(String),
}

pub type InteractionResult<T> = Result<T, InteractionError>;

/// Opaque handle for an in-flight progress indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressHandle {
    id: u64,
    message: String,
}

impl ProgressHandle {
    pub fn new(id: u64, message: &str) -> Self {
        Self {
            id,
            message: message.to_string(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Prompts and styled output used by the washer
pub trait InteractionAdapter {
    /// Ask a yes/no question
    fn ask_confirm(&self, prompt: &str, default: bool) -> InteractionResult<bool>;

    /// Let the user pick any subset of `options`; returns the chosen indices
    fn ask_multi_select(&self, prompt: &str, options: &[&str]) -> InteractionResult<Vec<usize>>;

    /// Start a progress indicator for a slow operation
    fn start_progress(&self, message: &str) -> ProgressHandle;

    /// Finish a progress indicator
    fn end_progress(&self, handle: ProgressHandle, success: bool);

    /// A stage step, e.g. `> Pruning remote branches...`
    fn print_step(&self, message: &str);

    /// A step with a highlighted subject, e.g. `> Deleting branch: ` + `feature`
    fn print_detail(&self, label: &str, value: &str);

    /// A skip or nothing-to-do notice
    fn print_warning(&self, message: &str);

    /// A stage completion
    fn print_success(&self, message: &str);

    /// A fatal error
    fn print_error(&self, message: &str);
}
