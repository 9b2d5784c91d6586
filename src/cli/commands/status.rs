//! Status command implementation.
//!
//! The `venvoy status` command reports what a launch would find, without
//! creating or installing anything.

use std::path::Path;

use crate::error::Result;
use crate::launcher::{Inspection, Launcher};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The status command implementation.
pub struct StatusCommand<'a> {
    context: ProjectContext,
    runner: &'a dyn CommandRunner,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(context: &ProjectContext, runner: &'a dyn CommandRunner) -> Self {
        Self {
            context: context.clone(),
            runner,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.root
    }
}

fn presence(found: bool) -> &'static str {
    if found {
        "found"
    } else {
        "missing"
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let launcher = Launcher::new(&self.context.root, config, self.runner);
        let inspection: Inspection = launcher.inspect()?;
        let config = launcher.config();

        ui.key_value(
            "marker",
            &format!(
                "{} ({})",
                config.marker.display(),
                presence(inspection.marker_present)
            ),
        );
        ui.key_value(
            "environment",
            &format!(
                "{} ({})",
                config.env_dir.display(),
                presence(inspection.env_exists)
            ),
        );
        ui.key_value(
            "manifest",
            &format!(
                "{} ({})",
                config.manifest.display(),
                presence(inspection.manifest_exists)
            ),
        );
        if let Some(status) = &inspection.dependencies {
            ui.key_value("dependencies", &status.to_string());
        }

        if !inspection.marker_present {
            ui.error(&format!("Not in the {} directory", config.expected_dir));
            return Ok(CommandResult::failure(1));
        }

        if inspection.is_ready() {
            ui.success("Ready to launch");
            Ok(CommandResult::success())
        } else {
            ui.warning("Launch will set up the environment first");
            if !inspection.manifest_exists {
                ui.hint(&format!(
                    "{} is missing, so setup would fail",
                    config.manifest.display()
                ));
            }
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(with_env: bool) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/smugmug-client.py"), "").unwrap();
        fs::write(temp.path().join("requirements.txt"), "requests\n").unwrap();
        if with_env {
            fs::create_dir_all(temp.path().join("venv/bin")).unwrap();
        }
        temp
    }

    #[test]
    fn status_ready_when_dependencies_import() {
        let temp = setup_project(true);
        let runner = MockRunner::new();
        let cmd = StatusCommand::new(&ProjectContext::new(temp.path()), &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.value_of("environment"), Some("venv (found)"));
        assert_eq!(ui.value_of("dependencies"), Some("all dependencies importable"));
        assert_eq!(runner.count_matching("pip install"), 0);
    }

    #[test]
    fn status_reports_missing_modules() {
        let temp = setup_project(true);
        let runner = MockRunner::new();
        runner.respond("import requests, requests_oauthlib, dotenv", [1]);
        runner.respond("import requests_oauthlib", [1]);
        let cmd = StatusCommand::new(&ProjectContext::new(temp.path()), &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.value_of("dependencies"), Some("missing requests_oauthlib"));
        assert!(ui.has_warning("set up"));
        assert_eq!(runner.count_matching("pip install"), 0);
    }

    #[test]
    fn status_without_env_does_not_create_it() {
        let temp = setup_project(false);
        let runner = MockRunner::new();
        let cmd = StatusCommand::new(&ProjectContext::new(temp.path()), &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(ui.value_of("environment"), Some("venv (missing)"));
        assert!(runner.calls().is_empty());
        assert!(!temp.path().join("venv").exists());
    }

    #[test]
    fn status_outside_project_fails() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let cmd = StatusCommand::new(&ProjectContext::new(temp.path()), &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("smugmug-client directory"));
        assert_eq!(ui.value_of("dependencies"), None);
    }

    #[test]
    fn status_hints_at_missing_manifest() {
        let temp = setup_project(false);
        fs::remove_file(temp.path().join("requirements.txt")).unwrap();
        let runner = MockRunner::new();
        let cmd = StatusCommand::new(&ProjectContext::new(temp.path()), &runner);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.hints().iter().any(|h| h.contains("requirements.txt")));
    }
}
