//! Config command implementation.
//!
//! The `venvoy config` command shows the resolved launch profile. The
//! document goes to stdout so it can be redirected into a `.venvoy.yml`.

use std::path::Path;

use crate::cli::args::ConfigArgs;
use crate::config::{find_project_config, LaunchConfig};
use crate::error::{Result, VenvoyError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The config command implementation.
pub struct ConfigCommand {
    context: ProjectContext,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(context: &ProjectContext, args: ConfigArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.root
    }

    /// Render the profile in the requested format.
    pub fn render(&self, config: &LaunchConfig) -> Result<String> {
        if self.args.json {
            serde_json::to_string_pretty(config).map_err(|e| VenvoyError::Other(e.into()))
        } else {
            serde_yaml::to_string(config).map_err(|e| VenvoyError::Other(e.into()))
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;

        let source = match &self.context.config_path {
            Some(path) => Some(path.clone()),
            None => find_project_config(&self.context.root),
        };
        match source {
            Some(path) => ui.message(&format!("# {}", path.display())),
            None => ui.message("# built-in defaults"),
        }

        println!("{}", self.render(&config)?.trim_end());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(&ProjectContext::new(temp.path()), ConfigArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
    }

    #[test]
    fn renders_yaml_by_default() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(&ProjectContext::new(temp.path()), ConfigArgs::default());

        let yaml = cmd.render(&LaunchConfig::default()).unwrap();
        assert!(yaml.contains("env_dir: venv"));
        assert!(yaml.contains("- requests_oauthlib"));
    }

    #[test]
    fn renders_json_on_request() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(&ProjectContext::new(temp.path()), ConfigArgs { json: true });

        let json = cmd.render(&LaunchConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["manifest"], "requirements.txt");
        assert_eq!(value["dependencies"][2], "dotenv");
    }

    #[test]
    fn shows_defaults_source() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(&ProjectContext::new(temp.path()), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("built-in defaults"));
    }

    #[test]
    fn shows_project_config_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".venvoy.yml"), "interpreter: python3.12\n").unwrap();
        let cmd = ConfigCommand::new(&ProjectContext::new(temp.path()), ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_message(".venvoy.yml"));
    }
}
