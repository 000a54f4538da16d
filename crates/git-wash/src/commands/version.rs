//! Implementation of the `--version` flag
//!
//! Prints the bare semantic version so scripts can compare it directly.

/// The package version as `MAJOR.MINOR.REVISION`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command
pub fn run_version() -> anyhow::Result<i32> {
    println!("{}", VERSION);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semantic() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }
}
