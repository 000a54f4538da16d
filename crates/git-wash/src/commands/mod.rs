//! CLI command implementations

pub mod version;
pub mod wash;

pub use version::run_version;
pub use wash::run_wash;
