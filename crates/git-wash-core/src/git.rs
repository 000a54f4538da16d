//! Repository handle and the git execution primitive
//!
//! Every git operation goes through a [`GitRunner`], so classification can run against
//! canned output in tests and against the real `git` binary in production.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::WashError;

/// Captured result of a single git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Raw standard output
    pub stdout: String,
    /// Whether the command exited successfully
    pub success: bool,
}

impl GitOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            success: true,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    /// Output with surrounding whitespace removed
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }

    /// Non-empty output lines, leading indentation preserved
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.trim().is_empty())
    }

    /// Succeed only if the command succeeded, returning the trimmed output
    pub fn ensure_success(&self, command: &str) -> Result<&str, WashError> {
        if self.success {
            Ok(self.text())
        } else {
            Err(WashError::Subprocess {
                command: command.to_string(),
                reason: "non-zero exit status".to_string(),
            })
        }
    }

    /// Like [`GitOutput::ensure_success`], but empty output is also a failure
    pub fn require_text(&self, command: &str) -> Result<&str, WashError> {
        let text = self.ensure_success(command)?;
        if text.is_empty() {
            return Err(WashError::Subprocess {
                command: command.to_string(),
                reason: "no output".to_string(),
            });
        }
        Ok(text)
    }
}

/// Runs one git command in a working directory
pub trait GitRunner {
    fn run(&self, cwd: &Path, args: &[&str]) -> GitOutput;
}

/// Production runner backed by the `git` binary
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitRunner for GitCli {
    fn run(&self, cwd: &Path, args: &[&str]) -> GitOutput {
        let output = Command::new("git").arg("-C").arg(cwd).args(args).output();

        match output {
            Ok(output) => {
                let success = output.status.success();
                debug!(args = ?args, success, "git");
                if !success {
                    debug!(
                        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                        "git stderr"
                    );
                }
                GitOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    success,
                }
            }
            Err(e) => {
                debug!(args = ?args, error = %e, "failed to spawn git");
                GitOutput::failed()
            }
        }
    }
}

/// A working tree plus the runner used to query it
#[derive(Debug, Clone)]
pub struct Repository<G: GitRunner = GitCli> {
    root: PathBuf,
    runner: G,
}

impl Repository<GitCli> {
    /// Find the repository containing `start` and wrap it with the real git binary
    pub fn discover(start: &Path) -> Result<Self, WashError> {
        let root = discover_repo_root(start)?;
        Ok(Self::new(root, GitCli))
    }
}

impl<G: GitRunner> Repository<G> {
    pub fn new(root: impl Into<PathBuf>, runner: G) -> Self {
        Self {
            root: root.into(),
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &G {
        &self.runner
    }

    /// Run a git command scoped to the repository root
    pub fn exec(&self, args: &[&str]) -> GitOutput {
        self.runner.run(&self.root, args)
    }

    /// True iff there are no staged, unstaged or untracked changes
    ///
    /// Evaluated on every call. A failed status query counts as dirty.
    pub fn is_clean(&self) -> bool {
        let out = self.exec(&["status", "-s"]);
        out.success && out.text().is_empty()
    }

    /// Delete a local branch
    ///
    /// `force` must only be set once the branch's changes are known to be integrated;
    /// git refuses a safe delete of a branch that is not an ancestor of HEAD.
    pub fn delete_branch(&self, name: &str, force: bool) -> Result<(), WashError> {
        let flag = if force { "-D" } else { "-d" };
        self.exec(&["branch", flag, name])
            .ensure_success(&format!("branch {}", flag))?;
        Ok(())
    }

    /// Fetch and drop remote-tracking refs whose remote branch is gone
    pub fn prune_remote_branches(&self) -> Result<(), WashError> {
        self.exec(&["fetch", "--prune"]).ensure_success("fetch --prune")?;
        Ok(())
    }
}

/// Walk upward from `start` to the nearest directory containing `.git`
///
/// `.git` may be a directory or, for linked worktrees and submodules, a file.
pub fn discover_repo_root(start: &Path) -> Result<PathBuf, WashError> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
        .ok_or(WashError::RepoNotFound)
}
