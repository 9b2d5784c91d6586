//! Recording command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation and answers with scripted exit codes, so launch
//! sequences can be asserted step by step.
//!
//! # Example
//!
//! ```
//! use venvoy::shell::{CommandOptions, CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("import", [1]);
//!
//! let check = CommandSpec::new("python").args(["-c", "import requests"]);
//! let result = runner.run(&check, &CommandOptions::default()).unwrap();
//! assert!(!result.success);
//! assert_eq!(runner.count_matching("import requests"), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{CommandOptions, CommandResult, CommandRunner, CommandSpec};
use crate::error::{Result, VenvoyError};

/// A command observed by [`MockRunner`].
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    /// The command as it would have been spawned.
    pub spec: CommandSpec,
    /// Options it would have been spawned with.
    pub options: CommandOptions,
}

impl RecordedCommand {
    /// Rendered command line.
    pub fn line(&self) -> String {
        self.spec.to_string()
    }
}

#[derive(Debug)]
struct Script {
    pattern: String,
    codes: VecDeque<i32>,
    fallback: i32,
}

/// Command runner that records calls and replays scripted exit codes.
///
/// Unscripted commands succeed. A scripted pattern matches any command line
/// containing it; its codes are consumed in order and the last one repeats.
#[derive(Debug, Default)]
pub struct MockRunner {
    calls: RefCell<Vec<RecordedCommand>>,
    scripts: RefCell<Vec<Script>>,
    unspawnable: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script exit codes for commands containing `pattern`.
    pub fn respond<I>(&self, pattern: &str, codes: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let codes: VecDeque<i32> = codes.into_iter().collect();
        let fallback = codes.back().copied().unwrap_or(0);
        self.scripts.borrow_mut().push(Script {
            pattern: pattern.to_string(),
            codes,
            fallback,
        });
    }

    /// Make commands containing `pattern` fail to spawn.
    pub fn fail_spawn(&self, pattern: &str) {
        self.unspawnable.borrow_mut().push(pattern.to_string());
    }

    /// All recorded commands, in order.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(RecordedCommand::line).collect()
    }

    /// Number of recorded commands containing `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(pattern)).count()
    }

    /// Index of the first recorded command containing `pattern`.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.lines().iter().position(|l| l.contains(pattern))
    }

    fn next_code(&self, line: &str) -> i32 {
        let mut scripts = self.scripts.borrow_mut();
        match scripts.iter_mut().find(|s| line.contains(&s.pattern)) {
            Some(script) => script.codes.pop_front().unwrap_or(script.fallback),
            None => 0,
        }
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
        let line = spec.to_string();
        self.calls.borrow_mut().push(RecordedCommand {
            spec: spec.clone(),
            options: options.clone(),
        });

        if self.unspawnable.borrow().iter().any(|p| line.contains(p)) {
            return Err(VenvoyError::CommandFailed {
                command: line,
                code: None,
            });
        }

        Ok(CommandResult::from_code(self.next_code(&line)))
    }
}
