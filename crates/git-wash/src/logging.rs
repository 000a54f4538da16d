//! Diagnostic tracing
//!
//! Stdout belongs to the stage messages, so diagnostics go to stderr. At the default
//! `warn` level they show only what a run absorbed without stopping, such as a branch
//! skipped during squash detection or a failed delete. `debug` adds every git command line.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber for a git-wash run
///
/// `RUST_LOG` overrides the `warn` default, e.g. to trace the git calls behind a branch
/// that was not classified as expected:
///
/// ```bash
/// RUST_LOG=git_wash_core=debug git wash --no-input --skip-prune
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
