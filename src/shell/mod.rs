//! Child process execution and platform helpers.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::{MockRunner, RecordedCommand};
pub use platform::{is_ci, resolve_program, system_path};
