//! CLI adapter implementation using dialoguer for interactive prompts
//!
//! This module provides `CliAdapter`, which implements `InteractionAdapter` for
//! terminal-based user interaction.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::Style;
use dialoguer::theme::Theme;
use dialoguer::{Confirm, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::warn;

use git_wash_core::{InteractionAdapter, InteractionError, InteractionResult, ProgressHandle};

use crate::colors::COLORS;

/// Exit code used when the user interrupts with Ctrl+C
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Set up the global Ctrl+C handler
///
/// dialoguer hides the cursor while a prompt is active; the handler restores it before
/// exiting.
pub fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        eprintln!();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }) {
        warn!(error = %e, "could not set Ctrl+C handler");
    }
}

/// Prompt theme matching the stage output
struct WashTheme {
    prompt_style: Style,
    active_style: Style,
    inactive_style: Style,
    hint_style: Style,
}

impl WashTheme {
    fn new() -> Self {
        Self {
            prompt_style: Style::new().white().bold(),
            active_style: Style::new().cyan(),
            inactive_style: Style::new(),
            hint_style: Style::new().dim(),
        }
    }
}

impl Theme for WashTheme {
    fn format_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(f, "{}", self.prompt_style.apply_to(format!("? {}", prompt)))
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        default: Option<bool>,
    ) -> std::fmt::Result {
        let hint = match default {
            Some(true) => "(Y/n)",
            Some(false) => "(y/N)",
            None => "(y/n)",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.hint_style.apply_to(hint)
        )
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        selection: Option<bool>,
    ) -> std::fmt::Result {
        let answer = match selection {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "?",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.active_style.apply_to(answer)
        )
    }

    fn format_multi_select_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.hint_style.apply_to("(space to toggle, enter to confirm)")
        )
    }

    fn format_multi_select_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        selections: &[&str],
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.active_style.apply_to(selections.join(", "))
        )
    }

    fn format_multi_select_prompt_item(
        &self,
        f: &mut dyn FmtWrite,
        text: &str,
        checked: bool,
        active: bool,
    ) -> std::fmt::Result {
        let checkbox = if checked { "[x]" } else { "[ ]" };
        if active {
            write!(
                f,
                "{} {} {}",
                self.active_style.apply_to(">"),
                self.active_style.apply_to(checkbox),
                self.active_style.apply_to(text)
            )
        } else {
            write!(
                f,
                "  {} {}",
                self.inactive_style.apply_to(checkbox),
                self.inactive_style.apply_to(text)
            )
        }
    }
}

/// CLI adapter for terminal-based user interaction
pub struct CliAdapter {
    is_tty: bool,
    color: bool,
    progress_counter: Cell<u64>,
    active_progress: RefCell<HashMap<u64, ProgressBar>>,
}

impl CliAdapter {
    pub fn new() -> Self {
        let color =
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::with_terminal(std::io::stdin().is_terminal(), color)
    }

    pub fn with_terminal(is_tty: bool, color: bool) -> Self {
        setup_ctrl_c_handler();
        Self {
            is_tty,
            color,
            progress_counter: Cell::new(0),
            active_progress: RefCell::new(HashMap::new()),
        }
    }

    fn require_tty(&self) -> InteractionResult<()> {
        if !self.is_tty {
            Err(InteractionError::NonTty)
        } else {
            Ok(())
        }
    }

    fn convert_dialoguer_error(err: dialoguer::Error) -> InteractionError {
        InteractionError::Io(err.to_string())
    }

    fn paint(&self, text: &str, style: owo_colors::Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn emit(&self, line: &str) {
        println!("{}", line);
        let _ = std::io::stdout().flush();
    }
}

impl Default for CliAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionAdapter for CliAdapter {
    fn ask_confirm(&self, prompt: &str, default: bool) -> InteractionResult<bool> {
        self.require_tty()?;

        Confirm::with_theme(&WashTheme::new())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(Self::convert_dialoguer_error)
    }

    fn ask_multi_select(&self, prompt: &str, options: &[&str]) -> InteractionResult<Vec<usize>> {
        self.require_tty()?;

        if options.is_empty() {
            return Err(InteractionError::InvalidInput(
                "options cannot be empty".to_string(),
            ));
        }

        MultiSelect::with_theme(&WashTheme::new())
            .with_prompt(prompt)
            .items(options)
            .interact()
            .map_err(Self::convert_dialoguer_error)
    }

    fn start_progress(&self, message: &str) -> ProgressHandle {
        let id = self.progress_counter.get();
        self.progress_counter.set(id + 1);

        let pb = if self.is_tty {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
        {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        self.active_progress.borrow_mut().insert(id, pb);

        ProgressHandle::new(id, message)
    }

    fn end_progress(&self, handle: ProgressHandle, success: bool) {
        if let Some(pb) = self.active_progress.borrow_mut().remove(&handle.id()) {
            pb.finish_and_clear();
            if !success {
                warn!(task = handle.message(), "progress ended unsuccessfully");
            }
        }
    }

    fn print_step(&self, message: &str) {
        self.emit(&self.paint(message, COLORS.step));
    }

    fn print_detail(&self, label: &str, value: &str) {
        let line = format!(
            "{}{}",
            self.paint(label, COLORS.step),
            self.paint(value, COLORS.detail)
        );
        self.emit(&line);
    }

    fn print_warning(&self, message: &str) {
        self.emit(&self.paint(message, COLORS.warning));
    }

    fn print_success(&self, message: &str) {
        self.emit(&self.paint(message, COLORS.success));
    }

    // Errors go to stdout alongside the stage output.
    fn print_error(&self, message: &str) {
        self.emit(&self.paint(message, COLORS.fail));
    }
}
