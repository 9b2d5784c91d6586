//! Dependency status types.
//!
//! A dependency check produces a [`DependencyStatus`] describing whether the
//! interpreter that will run the delegate can import everything it needs.

use std::fmt;

/// The result of checking the configured dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Every module imports cleanly.
    Satisfied,

    /// At least one module failed to import.
    Missing {
        /// Modules that failed on their own. Empty if only the combined
        /// import failed (e.g. an import-time error in a dependency).
        modules: Vec<String>,
    },

    /// The isolated environment does not exist yet, so nothing was checked.
    EnvironmentAbsent,
}

impl DependencyStatus {
    /// Whether the dependencies are all present.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, DependencyStatus::Satisfied)
    }

    /// Whether installation is required before delegating.
    pub fn needs_install(&self) -> bool {
        !self.is_satisfied()
    }

    /// Names of the modules known to be missing.
    pub fn missing_modules(&self) -> &[String] {
        match self {
            DependencyStatus::Missing { modules } => modules,
            _ => &[],
        }
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyStatus::Satisfied => write!(f, "all dependencies importable"),
            DependencyStatus::Missing { modules } if modules.is_empty() => {
                write!(f, "dependency import failed")
            }
            DependencyStatus::Missing { modules } => write!(f, "missing {}", modules.join(", ")),
            DependencyStatus::EnvironmentAbsent => write!(f, "environment not created"),
        }
    }
}
