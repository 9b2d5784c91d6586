//! Venvoy - Launch a Python tool inside its own virtual environment.
//!
//! Venvoy replaces a project's ad-hoc `run.sh` wrapper. It checks that it
//! was started from the project root, makes sure the isolated environment
//! exists and can import everything the tool needs, and then hands control
//! to the tool, passing its exit code through.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Launch profile loading and validation
//! - [`environment`] - Isolated environment layout and activation
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - The guard, check, install and delegate sequence
//! - [`requirements`] - Dependency probing and installation
//! - [`shell`] - Process execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use venvoy::config::LaunchConfig;
//! use venvoy::launcher::Launcher;
//! use venvoy::shell::MockRunner;
//! use venvoy::ui::MockUI;
//! use tempfile::TempDir;
//!
//! // Outside the project root nothing runs.
//! let temp = TempDir::new().unwrap();
//! let runner = MockRunner::new();
//! let launcher = Launcher::new(temp.path(), LaunchConfig::default(), &runner);
//!
//! let err = launcher.launch(&mut MockUI::new(), false).unwrap_err();
//! assert_eq!(err.exit_code(), 1);
//! assert!(runner.calls().is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{Result, VenvoyError};
