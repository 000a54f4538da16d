//! Configuration handling for git-wash
//!
//! Run options are resolved once at startup from command-line flags merged with an
//! optional TOML file, then passed read-only to every component.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WashError;

/// git-wash configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Wash-specific settings
    #[serde(default)]
    pub wash: WashConfig,
}

/// Defaults applied underneath the command-line flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WashConfig {
    /// Never prompt; auto-confirm every stage
    pub no_input: bool,

    /// Omit the prune stage
    pub skip_prune: bool,

    /// Omit the delete-merged stage
    pub skip_merged: bool,

    /// Omit the delete-squash-merged stage
    pub skip_squash_merged: bool,

    /// Branches that are never offered for deletion
    pub protected_branches: Vec<String>,
}

impl Config {
    /// Load configuration from `path`
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, WashError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| WashError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Flags as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub no_input: bool,
    pub skip_prune: bool,
    pub skip_merged: bool,
    pub skip_squash_merged: bool,
}

/// Immutable configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub no_input: bool,
    pub skip_prune: bool,
    pub skip_merged: bool,
    pub skip_squash_merged: bool,
    pub protected_branches: Vec<String>,
}

impl RunOptions {
    /// Merge command-line flags over the file configuration
    ///
    /// A stage is skipped (or input disabled) if either source asks for it.
    pub fn resolve(flags: Flags, config: &Config) -> Self {
        let wash = &config.wash;
        Self {
            no_input: flags.no_input || wash.no_input,
            skip_prune: flags.skip_prune || wash.skip_prune,
            skip_merged: flags.skip_merged || wash.skip_merged,
            skip_squash_merged: flags.skip_squash_merged || wash.skip_squash_merged,
            protected_branches: wash.protected_branches.clone(),
        }
    }

    /// Whether `branch` must never be deleted
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches.iter().any(|b| b == branch)
    }
}
