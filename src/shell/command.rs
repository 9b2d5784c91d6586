//! Child process execution.
//!
//! Commands are spawned directly (no intermediate shell) so arguments reach
//! the program verbatim. All environment changes travel in
//! [`CommandOptions`]; the launcher's own process environment is never
//! modified.

use crate::error::{Result, VenvoyError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: PathBuf,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a spec for a program with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged over the inherited env).
    pub env: BTreeMap<String, String>,

    /// Variables removed from the inherited env.
    pub env_remove: Vec<String>,

    /// Capture stdout and stderr (if false, both are inherited).
    pub capture: bool,
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Terminating signal on Unix.
    pub signal: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a result from a bare exit code.
    pub fn from_code(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
            stdout: String::new(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: code == 0,
        }
    }

    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            signal: super::platform::exit_signal(&status),
            stdout,
            stderr,
            duration,
            success: status.success(),
        }
    }

    /// Exit code suitable for passing on to our own caller.
    ///
    /// Signal deaths map to `128 + signal`, the shell convention.
    pub fn propagated_code(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}

/// Runs commands on behalf of the launcher.
///
/// The launch sequence only talks to processes through this trait, so tests
/// can record invocations instead of spawning real interpreters.
pub trait CommandRunner {
    /// Run a command to completion.
    fn run(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult>;
}

/// Runner that spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
        execute(spec, options)
    }
}

/// Execute a command and wait for it.
pub fn execute(spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for key in &options.env_remove {
        cmd.env_remove(key);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    tracing::debug!("Executing: {}", spec);

    let spawn_failed = |e: std::io::Error| {
        tracing::debug!("Failed to run {}: {}", spec, e);
        VenvoyError::CommandFailed {
            command: spec.to_string(),
            code: None,
        }
    };

    let result = if options.capture {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = cmd.output().map_err(spawn_failed)?;
        CommandResult::from_status(
            output.status,
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            start.elapsed(),
        )
    } else {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let status = cmd.status().map_err(spawn_failed)?;
        CommandResult::from_status(status, String::new(), String::new(), start.elapsed())
    };

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        spec,
        result.exit_code,
        result.duration
    );

    Ok(result)
}
