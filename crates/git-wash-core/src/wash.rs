//! The repo washer: sequences the cleanup stages
//!
//! A run checks the working tree, then walks `Prune -> DeleteMerged -> DeleteSquashMerged`.
//! Each stage can be skipped through [`RunOptions`]; a stage's failures are absorbed and
//! reported in its [`StageOutcome`], never propagated to the following stages.

use std::fmt;

use tracing::{info, warn};

use crate::classify::{merged_branches, squash_merged_branches};
use crate::config::RunOptions;
use crate::error::WashError;
use crate::git::{GitRunner, Repository};
use crate::interaction::InteractionAdapter;
use crate::select::{Mode, apply_protection, confirm_prune, select_branches};

const COMPLETE: &str = "Complete! 🎉";
const SKIPPING: &str = "! Skipping...";
const SQUASH_PROGRESS: &str = "Looking for squash-merged branches...";

/// Action stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prune,
    DeleteMerged,
    DeleteSquashMerged,
}

impl Stage {
    pub const FIRST: Stage = Stage::Prune;

    /// The stage that follows this one, `None` once done
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Prune => Some(Stage::DeleteMerged),
            Stage::DeleteMerged => Some(Stage::DeleteSquashMerged),
            Stage::DeleteSquashMerged => None,
        }
    }

    pub fn is_skipped(self, options: &RunOptions) -> bool {
        match self {
            Stage::Prune => options.skip_prune,
            Stage::DeleteMerged => options.skip_merged,
            Stage::DeleteSquashMerged => options.skip_squash_merged,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prune => "prune",
            Stage::DeleteMerged => "delete-merged",
            Stage::DeleteSquashMerged => "delete-squash-merged",
        };
        f.write_str(name)
    }
}

/// What a stage ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Disabled by flag or config
    Skipped,
    /// The user declined the prune confirmation
    Declined,
    /// The prune command failed
    Failed,
    /// Remote-tracking refs were pruned
    Pruned,
    /// No branch was selected for deletion
    NothingToDelete,
    /// Selected branches were processed
    Deleted {
        deleted: Vec<String>,
        failed: Vec<String>,
    },
}

/// Outcome of every stage of a run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WashReport {
    pub stages: Vec<(Stage, StageOutcome)>,
}

impl WashReport {
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, outcome)| outcome)
    }

    /// All branches deleted during the run
    pub fn deleted_branches(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                StageOutcome::Deleted { deleted, .. } => Some(deleted),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Wording and delete mode of a branch deletion stage
struct DeletionKind {
    noun: &'static str,
    force: bool,
}

const MERGED: DeletionKind = DeletionKind {
    noun: "merged",
    force: false,
};

// Squash-merged branches are not ancestors of HEAD, so a safe delete would be refused.
const SQUASH_MERGED: DeletionKind = DeletionKind {
    noun: "squash-merged",
    force: true,
};

/// Runs the cleanup stages against one repository
pub struct RepoWasher<'a, G: GitRunner, A: InteractionAdapter + ?Sized> {
    repo: &'a Repository<G>,
    options: &'a RunOptions,
    adapter: &'a A,
}

impl<'a, G: GitRunner, A: InteractionAdapter + ?Sized> RepoWasher<'a, G, A> {
    pub fn new(repo: &'a Repository<G>, options: &'a RunOptions, adapter: &'a A) -> Self {
        Self {
            repo,
            options,
            adapter,
        }
    }

    fn mode(&self) -> Mode {
        Mode::from_no_input(self.options.no_input)
    }

    /// Check the working tree, then run every stage in order
    pub fn run(&self) -> Result<WashReport, WashError> {
        if !self.repo.is_clean() {
            return Err(WashError::WorkingTreeDirty);
        }

        let mut report = WashReport::default();
        let mut stage = Some(Stage::FIRST);
        while let Some(current) = stage {
            let outcome = if current.is_skipped(self.options) {
                StageOutcome::Skipped
            } else {
                self.run_stage(current)
            };
            info!(stage = %current, outcome = ?outcome, "stage finished");
            report.stages.push((current, outcome));
            stage = current.next();
        }

        Ok(report)
    }

    fn run_stage(&self, stage: Stage) -> StageOutcome {
        match stage {
            Stage::Prune => self.prune_branches(),
            Stage::DeleteMerged => self.delete_merged_branches(),
            Stage::DeleteSquashMerged => self.delete_squash_merged_branches(),
        }
    }

    /// Prune remote-tracking branches whose remote branch no longer exists
    pub fn prune_branches(&self) -> StageOutcome {
        let mode = self.mode();
        if mode == Mode::Auto {
            self.adapter.print_step("> Pruning remote branches...");
        }

        if !confirm_prune(self.adapter, mode) {
            self.adapter.print_warning(SKIPPING);
            return StageOutcome::Declined;
        }

        match self.repo.prune_remote_branches() {
            Ok(()) => {
                self.adapter.print_success(COMPLETE);
                StageOutcome::Pruned
            }
            Err(e) => {
                warn!(error = %e, "prune failed");
                self.adapter.print_warning(SKIPPING);
                StageOutcome::Failed
            }
        }
    }

    /// Delete branches already merged into HEAD
    pub fn delete_merged_branches(&self) -> StageOutcome {
        let candidates = merged_branches(self.repo);
        self.delete_candidates(&MERGED, candidates)
    }

    /// Delete branches whose changes were squash-merged into HEAD
    pub fn delete_squash_merged_branches(&self) -> StageOutcome {
        let progress = self.adapter.start_progress(SQUASH_PROGRESS);
        let candidates = squash_merged_branches(self.repo);
        self.adapter.end_progress(progress, true);

        self.delete_candidates(&SQUASH_MERGED, candidates)
    }

    fn delete_candidates(&self, kind: &DeletionKind, candidates: Vec<String>) -> StageOutcome {
        let candidates = apply_protection(candidates, self.options);
        info!(kind = kind.noun, count = candidates.len(), "classified branches");

        let mode = self.mode();
        let prompt = format!(
            "Which of these {} branches would you like to delete:",
            kind.noun
        );
        let chosen = select_branches(self.adapter, &prompt, &candidates, mode);

        if mode == Mode::Auto || candidates.is_empty() {
            self.adapter
                .print_step(&format!("> Deleting {} branches...", kind.noun));
        }

        if chosen.is_empty() {
            self.adapter
                .print_warning(&format!("! No {} branches to delete.", kind.noun));
            return StageOutcome::NothingToDelete;
        }

        let mut deleted = Vec::new();
        let mut failed = Vec::new();
        for branch in chosen {
            self.adapter.print_detail("> Deleting branch: ", &branch);
            match self.repo.delete_branch(&branch, kind.force) {
                Ok(()) => deleted.push(branch),
                Err(e) => {
                    warn!(branch = %branch, error = %e, "delete failed");
                    self.adapter
                        .print_warning(&format!("! Unable to delete branch: {}", branch));
                    failed.push(branch);
                }
            }
        }

        if !deleted.is_empty() {
            self.adapter.print_success(COMPLETE);
        }
        StageOutcome::Deleted { deleted, failed }
    }
}
