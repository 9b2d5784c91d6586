//! Dependency probe.
//!
//! Resolution is delegated to the interpreter itself: a module counts as
//! present when `python -c "import <module>"` exits 0. All modules are
//! tried in one import first, which is the common case. Only when that
//! fails is each module tried alone, to name the missing ones.

use std::path::Path;

use super::DependencyStatus;
use crate::error::Result;
use crate::shell::{CommandOptions, CommandRunner, CommandSpec};

/// Checks that a set of modules can be imported.
#[derive(Debug, Clone)]
pub struct DependencyProbe {
    modules: Vec<String>,
}

impl DependencyProbe {
    /// Probe for the given module names.
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }

    /// Modules this probe checks.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// The command that imports `modules` with `python`.
    pub fn import_command(python: &Path, modules: &[String]) -> CommandSpec {
        CommandSpec::new(python)
            .arg("-c")
            .arg(format!("import {}", modules.join(", ")))
    }

    /// Run the check with `python`, capturing output so success stays silent.
    ///
    /// A command that cannot even start counts as a failed import.
    pub fn check(
        &self,
        runner: &dyn CommandRunner,
        python: &Path,
        options: &CommandOptions,
    ) -> Result<DependencyStatus> {
        let options = CommandOptions {
            capture: true,
            ..options.clone()
        };

        if imports(runner, python, &self.modules, &options) {
            tracing::debug!("All {} dependencies import", self.modules.len());
            return Ok(DependencyStatus::Satisfied);
        }

        let missing: Vec<String> = if self.modules.len() > 1 {
            self.modules
                .iter()
                .filter(|m| !imports(runner, python, std::slice::from_ref(*m), &options))
                .cloned()
                .collect()
        } else {
            self.modules.clone()
        };

        tracing::debug!("Dependency import failed; missing: {:?}", missing);
        Ok(DependencyStatus::Missing { modules: missing })
    }
}

fn imports(
    runner: &dyn CommandRunner,
    python: &Path,
    modules: &[String],
    options: &CommandOptions,
) -> bool {
    let spec = DependencyProbe::import_command(python, modules);
    match runner.run(&spec, options) {
        Ok(result) => result.success,
        Err(e) => {
            tracing::debug!("Import check could not run: {}", e);
            false
        }
    }
}
