//! Selection policy: which candidates are actually acted upon

use tracing::warn;

use crate::config::RunOptions;
use crate::error::WashError;
use crate::interaction::{InteractionAdapter, InteractionError};

/// Prompt shown before pruning remote-tracking branches
pub const PRUNE_PROMPT: &str = "Do you want to prune remote branches that are deleted or merged?";

/// How candidates are turned into a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Take every candidate without asking
    Auto,
    /// Ask the user
    Interactive,
}

impl Mode {
    pub fn from_no_input(no_input: bool) -> Self {
        if no_input { Mode::Auto } else { Mode::Interactive }
    }
}

/// Drop protected names from a candidate set, preserving order
pub fn apply_protection(candidates: Vec<String>, options: &RunOptions) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|branch| !options.is_protected(branch))
        .collect()
}

/// Choose which `candidates` to act on
///
/// Interactive mode never prompts for an empty candidate set. Prompt failures select
/// nothing.
pub fn select_branches<A: InteractionAdapter + ?Sized>(
    adapter: &A,
    prompt: &str,
    candidates: &[String],
    mode: Mode,
) -> Vec<String> {
    match mode {
        Mode::Auto => candidates.to_vec(),
        Mode::Interactive if candidates.is_empty() => Vec::new(),
        Mode::Interactive => {
            let options: Vec<&str> = candidates.iter().map(String::as_str).collect();
            match adapter
                .ask_multi_select(prompt, &options)
                .and_then(|chosen| pick(candidates, chosen))
                .map_err(WashError::from)
            {
                Ok(selected) => selected,
                Err(e) => {
                    warn!(kind = e.kind(), error = %e, "selection failed, deleting nothing");
                    Vec::new()
                }
            }
        }
    }
}

/// Map chosen indices back to names in candidate order
fn pick(candidates: &[String], mut chosen: Vec<usize>) -> Result<Vec<String>, InteractionError> {
    chosen.sort_unstable();
    chosen.dedup();
    chosen
        .into_iter()
        .map(|i| {
            candidates.get(i).cloned().ok_or_else(|| {
                InteractionError::InvalidInput(format!("selection index {} out of range", i))
            })
        })
        .collect()
}

/// Decide whether to prune remote-tracking branches
///
/// Interactive mode defaults to yes. Only an explicit "no" declines; a prompt that cannot
/// be answered keeps the default.
pub fn confirm_prune<A: InteractionAdapter + ?Sized>(adapter: &A, mode: Mode) -> bool {
    match mode {
        Mode::Auto => true,
        Mode::Interactive => {
            match adapter
                .ask_confirm(PRUNE_PROMPT, true)
                .map_err(WashError::from)
            {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(kind = e.kind(), error = %e, "prune confirmation failed, pruning");
                    true
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mode_from_no_input() {
        assert_eq!(Mode::from_no_input(true), Mode::Auto);
        assert_eq!(Mode::from_no_input(false), Mode::Interactive);
    }

    #[test]
    fn test_apply_protection_keeps_order() {
        let candidates = names(&["b", "main", "a", "develop"]);
        let options = RunOptions {
            protected_branches: names(&["main", "develop"]),
            ..RunOptions::default()
        };
        assert_eq!(apply_protection(candidates, &options), names(&["b", "a"]));
    }

    #[test]
    fn test_pick_maps_indices_in_candidate_order() {
        let candidates = names(&["a", "b", "c"]);
        assert_eq!(pick(&candidates, vec![2, 0, 2]).unwrap(), names(&["a", "c"]));
    }

    #[test]
    fn test_pick_rejects_out_of_range() {
        let candidates = names(&["a"]);
        assert!(matches!(
            pick(&candidates, vec![3]),
            Err(InteractionError::InvalidInput(_))
        ));
    }
}
