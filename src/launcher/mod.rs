//! Launch orchestration.
//!
//! A launch runs four steps in order:
//!
//! 1. **Guard**: the marker file must exist relative to the project root.
//! 2. **Activate**: the isolated environment, if present, is activated for
//!    every command that follows. Activation is a value applied to each
//!    child process; the launcher's own environment is never touched.
//! 3. **Check**: the configured modules must import inside the environment.
//!    If the environment is absent it is created, then the manifest is
//!    installed and the check runs once more.
//! 4. **Delegate**: the main program runs in the foreground and its exit
//!    code becomes ours.

pub mod plan;
pub mod sequence;

pub use plan::{LaunchPlan, LaunchReport, LaunchStep};
pub use sequence::{Inspection, Launcher};
