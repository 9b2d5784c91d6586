//! Run command implementation.
//!
//! The `venvoy run` command prepares the environment and launches the
//! main program. It is also what runs when no subcommand is given.

use std::path::Path;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::launcher::{LaunchReport, Launcher};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The run command implementation.
pub struct RunCommand<'a> {
    context: ProjectContext,
    args: RunArgs,
    runner: &'a dyn CommandRunner,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(context: &ProjectContext, args: RunArgs, runner: &'a dyn CommandRunner) -> Self {
        Self {
            context: context.clone(),
            args,
            runner,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn show_plan(&self, ui: &mut dyn UserInterface, report: &LaunchReport) {
        ui.message("Dry run, nothing was changed. A launch would:");
        for (i, step) in report.plan.steps().iter().enumerate() {
            ui.message(&format!("  {}. {}", i + 1, step));
        }
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let launcher = Launcher::new(&self.context.root, config, self.runner);

        let report = launcher.launch(ui, self.args.dry_run)?;
        match report.exit_code {
            Some(code) => Ok(CommandResult::from_exit_code(code)),
            None => {
                self.show_plan(ui, &report);
                Ok(CommandResult::success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VenvoyError;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/smugmug-client.py"), "").unwrap();
        fs::write(temp.path().join("requirements.txt"), "requests\n").unwrap();
        temp
    }

    #[test]
    fn run_command_creation() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let cmd = RunCommand::new(&ProjectContext::new(temp.path()), RunArgs::default(), &runner);

        assert_eq!(cmd.project_root(), temp.path());
        assert!(!cmd.args().dry_run);
    }

    #[test]
    fn run_outside_project_is_an_error() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let cmd = RunCommand::new(&ProjectContext::new(temp.path()), RunArgs::default(), &runner);
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, VenvoyError::WrongDirectory { .. }));
    }

    #[test]
    fn run_reports_delegate_exit_code() {
        let temp = setup_project();
        fs::create_dir_all(temp.path().join("venv/bin")).unwrap();
        let runner = MockRunner::new();
        runner.respond("smugmug-client.py", [5]);
        let cmd = RunCommand::new(&ProjectContext::new(temp.path()), RunArgs::default(), &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 5);
    }

    #[test]
    fn dry_run_lists_steps() {
        let temp = setup_project();
        let runner = MockRunner::new();
        let args = RunArgs { dry_run: true };
        let cmd = RunCommand::new(&ProjectContext::new(temp.path()), args, &runner);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Dry run"));
        assert!(ui.has_message("install from requirements.txt"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let temp = setup_project();
        fs::write(temp.path().join(".venvoy.yml"), "dependencies: []\n").unwrap();
        let runner = MockRunner::new();
        let cmd = RunCommand::new(&ProjectContext::new(temp.path()), RunArgs::default(), &runner);
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, VenvoyError::ConfigValidationError { .. }));
        assert!(runner.calls().is_empty());
    }
}
