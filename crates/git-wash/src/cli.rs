//! CLI argument parsing with clap derive

use clap::Parser;
use git_wash_core::Flags;

/// git-wash - A Git extension to clean up your repo
#[derive(Parser)]
#[command(name = "git-wash")]
#[command(about = "A Git extension to clean up your repo")]
#[command(long_about = "A Git extension to clean up your repo.\n\nRuns three stages in order, each of which can be skipped:\n  prune                 Remove remote-tracking branches deleted on the remote\n  delete merged         Delete local branches already merged into HEAD\n  delete squash-merged  Force-delete local branches whose changes were squash-merged\n\nThe working tree must be clean. Defaults can be set in\n<config dir>/git-wash/config.toml or the file named by GIT_WASH_CONFIG.")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Show the version for git-wash
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Do not prompt for input
    #[arg(short = 'y', long)]
    pub no_input: bool,

    /// Skips pruning of remote branches that are deleted or merged
    #[arg(long)]
    pub skip_prune: bool,

    /// Skips deletion of branches that have been merged
    #[arg(long)]
    pub skip_merged: bool,

    /// Skips deletion of branches that have been squash merged
    #[arg(long)]
    pub skip_squash_merged: bool,
}

impl Cli {
    /// The run flags, without the informational ones
    pub fn flags(&self) -> Flags {
        Flags {
            no_input: self.no_input,
            skip_prune: self.skip_prune,
            skip_merged: self.skip_merged,
            skip_squash_merged: self.skip_squash_merged,
        }
    }
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["git-wash", "-y"]).unwrap();
        assert!(cli.no_input);
        assert!(!cli.version);

        let cli = Cli::try_parse_from(["git-wash", "-v"]).unwrap();
        assert!(cli.version);
    }

    #[test]
    fn test_skip_flags_map_to_run_flags() {
        let cli = Cli::try_parse_from(["git-wash", "--skip-prune", "--skip-squash-merged"]).unwrap();
        assert_eq!(
            cli.flags(),
            Flags {
                no_input: false,
                skip_prune: true,
                skip_merged: false,
                skip_squash_merged: true,
            }
        );
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["git-wash", "main"]).is_err());
    }
}
