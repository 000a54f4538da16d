//! Branch classification
//!
//! Two independent detectors over repository output:
//!
//! - **merged**: branches whose history is already reachable from HEAD, read from
//!   `git branch --merged`.
//! - **squash-merged**: branches whose net change landed on HEAD as a different commit.
//!   For each branch a throwaway commit is synthesized with the branch tip's tree on top
//!   of the merge base, and `git cherry` reports whether an equivalent patch already
//!   exists upstream.
//!
//! The checked-out branch is excluded by construction in both detectors.

use tracing::{debug, warn};

use crate::error::WashError;
use crate::git::{GitRunner, Repository};

/// Marker `git branch` puts in front of the checked-out branch
const CURRENT_BRANCH_MARKER: char = '*';

/// Marker `git branch` puts in front of branches checked out in another worktree
const WORKTREE_BRANCH_MARKER: char = '+';

/// `git cherry` prefix for a commit with an equivalent change upstream
const CHERRY_APPLIED_MARKER: char = '-';

/// Parse `git branch --merged` output into deletable branch names
///
/// Each line carries a two-column prefix. Lines marked as checked out (here or in a linked
/// worktree) are dropped, including a detached `* (HEAD detached at ...)` entry.
pub fn parse_merged_listing<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| {
            !line.starts_with(CURRENT_BRANCH_MARKER) && !line.starts_with(WORKTREE_BRANCH_MARKER)
        })
        .filter_map(|line| line.get(2..))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Local branches fully reachable from HEAD, excluding HEAD itself
///
/// Colour is forced off so a `color.ui=always` setting cannot leak escape codes into
/// branch names. A failed listing yields no candidates.
pub fn merged_branches<G: GitRunner>(repo: &Repository<G>) -> Vec<String> {
    let out = repo.exec(&["branch", "--merged", "--no-color"]);
    if let Err(e) = out.ensure_success("branch --merged") {
        warn!(error = %e, "could not list merged branches");
        return Vec::new();
    }
    parse_merged_listing(out.lines())
}

/// Local branches whose changes were squash-merged into HEAD
///
/// Branches that cannot be evaluated are skipped, never reported as an error.
pub fn squash_merged_branches<G: GitRunner>(repo: &Repository<G>) -> Vec<String> {
    let head = match repo
        .exec(&["rev-parse", "--abbrev-ref", "HEAD"])
        .require_text("rev-parse --abbrev-ref HEAD")
    {
        Ok(head) => head.to_string(),
        Err(e) => {
            warn!(error = %e, "could not resolve HEAD");
            return Vec::new();
        }
    };

    let listing = repo.exec(&["for-each-ref", "refs/heads/", "--format=%(refname:short)"]);
    if let Err(e) = listing.ensure_success("for-each-ref") {
        warn!(error = %e, "could not list local branches");
        return Vec::new();
    }

    listing
        .lines()
        .map(str::trim)
        .filter(|branch| *branch != head)
        .filter(|branch| match is_squash_merged(repo, &head, branch) {
            Ok(squashed) => squashed,
            Err(e) => {
                warn!(branch, error = %e, "skipping branch");
                false
            }
        })
        .map(str::to_string)
        .collect()
}

/// Decide whether `branch` was squash-merged into `head`
///
/// Returns `Ok(false)` for branches that are plain ancestors of `head`; those belong to
/// the merged set.
pub fn is_squash_merged<G: GitRunner>(
    repo: &Repository<G>,
    head: &str,
    branch: &str,
) -> Result<bool, WashError> {
    let ancestor = repo
        .exec(&["merge-base", head, branch])
        .require_text("merge-base")?
        .to_string();

    let commit_spec = format!("{}^{{commit}}", branch);
    let tip = repo
        .exec(&["rev-parse", "--verify", commit_spec.as_str()])
        .require_text("rev-parse --verify")?
        .to_string();
    if tip == ancestor {
        debug!(branch, "branch is an ancestor of HEAD");
        return Ok(false);
    }

    let tree_spec = format!("{}^{{tree}}", branch);
    let tree = repo
        .exec(&["rev-parse", tree_spec.as_str()])
        .require_text("rev-parse tree")?
        .to_string();

    let synthetic = repo
        .exec(&["commit-tree", tree.as_str(), "-p", ancestor.as_str(), "-m", "_"])
        .require_text("commit-tree")?
        .to_string();

    let cherry = repo.exec(&["cherry", head, synthetic.as_str()]);
    let cherry = cherry.ensure_success("cherry")?;

    Ok(cherry.starts_with(CHERRY_APPLIED_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merged_listing_drops_current_branch() {
        let listing = "  feature\n* main\n  fix/typo\n";
        assert_eq!(
            parse_merged_listing(listing.lines()),
            vec!["feature", "fix/typo"]
        );
    }

    #[test]
    fn test_parse_merged_listing_does_not_compare_names() {
        // A branch literally named like the current one is still kept when unmarked.
        let listing = "* main\n  main-old\n";
        assert_eq!(parse_merged_listing(listing.lines()), vec!["main-old"]);
    }

    #[test]
    fn test_parse_merged_listing_detached_head() {
        let listing = "* (HEAD detached at 1a2b3c4)\n  feature\n  main\n";
        assert_eq!(
            parse_merged_listing(listing.lines()),
            vec!["feature", "main"]
        );
    }

    #[test]
    fn test_parse_merged_listing_skips_worktree_branches() {
        let listing = "+ checked-out-elsewhere\n* main\n  done\n";
        assert_eq!(parse_merged_listing(listing.lines()), vec!["done"]);
    }

    #[test]
    fn test_parse_merged_listing_empty() {
        assert!(parse_merged_listing("".lines()).is_empty());
        assert!(parse_merged_listing("* main\n".lines()).is_empty());
    }
}
