//! Semantic color theme for consistent terminal output
//!
//! - `step` => bold white - stage and per-branch actions
//! - `detail` => white - the subject of an action (branch names)
//! - `warning` => yellow - skips and nothing-to-do notices
//! - `success` => bold green - completed stages
//! - `fail` => bold red - fatal errors

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    pub step: Style,
    pub detail: Style,
    pub warning: Style,
    pub success: Style,
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            step: Style::new().white().bold(),
            detail: Style::new().white(),
            warning: Style::new().yellow(),
            success: Style::new().green().bold(),
            fail: Style::new().red().bold(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_styles_wrap_text() {
        let styled = "Complete!".style(COLORS.success).to_string();
        assert!(styled.contains("Complete!"));
        assert_ne!(styled, "Complete!");
    }

    #[test]
    fn test_colors_global_is_accessible() {
        let _ = &COLORS.step;
        let _ = &COLORS.detail;
        let _ = &COLORS.warning;
        let _ = &COLORS.fail;
    }
}
