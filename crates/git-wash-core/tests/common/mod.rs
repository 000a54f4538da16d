//! Scripted collaborators shared by the core integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use git_wash_core::{
    GitOutput, GitRunner, InteractionAdapter, InteractionError, InteractionResult,
    ProgressHandle,
};

/// Git runner answering from a table keyed by the space-joined arguments
///
/// Unknown commands fail, which doubles as failure injection.
#[derive(Default)]
pub struct ScriptedGit {
    responses: HashMap<String, GitOutput>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, args: &str, stdout: &str) -> Self {
        self.responses
            .insert(args.to_string(), GitOutput::ok(stdout));
        self
    }

    pub fn failing(mut self, args: &str) -> Self {
        self.responses.insert(args.to_string(), GitOutput::failed());
        self
    }

    /// Script the five round-trips of a squash-merge check for `branch`
    pub fn squash_check(self, head: &str, branch: &str, base: &str, tip: &str, cherry: &str) -> Self {
        let tree = format!("tree-{}", branch);
        let synthetic = format!("synthetic-{}", branch);
        self.on(&format!("merge-base {} {}", head, branch), base)
            .on(&format!("rev-parse --verify {}^{{commit}}", branch), tip)
            .on(&format!("rev-parse {}^{{tree}}", branch), &tree)
            .on(&format!("commit-tree {} -p {} -m _", tree, base), &synthetic)
            .on(&format!("cherry {} {}", head, synthetic), cherry)
    }

    pub fn was_called(&self, args: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == args)
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl GitRunner for ScriptedGit {
    fn run(&self, _cwd: &Path, args: &[&str]) -> GitOutput {
        let key = args.join(" ");
        self.calls.borrow_mut().push(key.clone());
        self.responses.get(&key).cloned().unwrap_or_default()
    }
}

/// A scripted answer to the next prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Select(Vec<usize>),
    Fail,
}

/// Interaction adapter replaying answers in call order and recording output
#[derive(Default)]
pub struct ScriptedAdapter {
    answers: RefCell<VecDeque<Answer>>,
    pub prompts: RefCell<Vec<String>>,
    pub lines: RefCell<Vec<String>>,
    pub progress: RefCell<Vec<String>>,
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            ..Self::default()
        }
    }

    pub fn output(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn printed(&self, line: &str) -> bool {
        self.lines.borrow().iter().any(|l| l == line)
    }

    fn next_answer(&self) -> Option<Answer> {
        self.answers.borrow_mut().pop_front()
    }
}

impl InteractionAdapter for ScriptedAdapter {
    fn ask_confirm(&self, prompt: &str, default: bool) -> InteractionResult<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.next_answer() {
            Some(Answer::Confirm(answer)) => Ok(answer),
            None => Ok(default),
            Some(_) => Err(InteractionError::InvalidInput("unexpected prompt".to_string())),
        }
    }

    fn ask_multi_select(&self, prompt: &str, _options: &[&str]) -> InteractionResult<Vec<usize>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.next_answer() {
            Some(Answer::Select(chosen)) => Ok(chosen),
            None => Ok(Vec::new()),
            Some(_) => Err(InteractionError::InvalidInput("unexpected prompt".to_string())),
        }
    }

    fn start_progress(&self, message: &str) -> ProgressHandle {
        self.progress.borrow_mut().push(message.to_string());
        ProgressHandle::new(0, message)
    }

    fn end_progress(&self, _handle: ProgressHandle, _success: bool) {}

    fn print_step(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn print_detail(&self, label: &str, value: &str) {
        self.lines.borrow_mut().push(format!("{}{}", label, value));
    }

    fn print_warning(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn print_success(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn print_error(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
