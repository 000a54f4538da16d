//! Implementation of the default wash run
//!
//! Resolves run options, locates the repository from the current directory and hands
//! over to the washer. The two startup failures are printed and map to exit code 1.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use git_wash_core::{
    Config, Flags, InteractionAdapter, RepoWasher, Repository, RunOptions, WashError,
};

use crate::interaction::CliAdapter;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "GIT_WASH_CONFIG";

/// Locate the config file: `$GIT_WASH_CONFIG`, else `<config dir>/git-wash/config.toml`
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("git-wash").join("config.toml"))
}

/// Run the wash with the given command-line flags
pub fn run_wash(flags: Flags) -> anyhow::Result<i32> {
    let config = match config_path() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load(&path)
                .with_context(|| format!("could not load config from {}", path.display()))?
        }
        None => Config::default(),
    };
    let options = RunOptions::resolve(flags, &config);

    let cwd = std::env::current_dir().context("could not determine current directory")?;
    let adapter = CliAdapter::new();

    let repo = match Repository::discover(&cwd) {
        Ok(repo) => repo,
        Err(e) => return Ok(report_fatal(&adapter, &e)),
    };
    info!(root = %repo.root().display(), "washing repository");

    match RepoWasher::new(&repo, &options, &adapter).run() {
        Ok(report) => {
            debug!(deleted = ?report.deleted_branches(), "wash finished");
            Ok(0)
        }
        Err(e) => Ok(report_fatal(&adapter, &e)),
    }
}

/// Print a fatal error and return its exit code
fn report_fatal(adapter: &dyn InteractionAdapter, err: &WashError) -> i32 {
    debug!(kind = err.kind(), "fatal error");
    adapter.print_error(&format!("Error: {}", err));
    err.exit_code()
}
