//! The launch sequence: guard, activate, check, install, delegate.

use std::path::{Path, PathBuf};

use super::plan::{LaunchPlan, LaunchReport, LaunchStep};
use crate::config::{EnvFileParser, LaunchConfig};
use crate::environment::{Activation, IsolatedEnv};
use crate::error::{Result, VenvoyError};
use crate::requirements::{self, DependencyProbe, DependencyStatus};
use crate::shell::{resolve_program, system_path, CommandOptions, CommandRunner, CommandSpec};
use crate::ui::UserInterface;

fn absolute_root(project_root: &Path) -> PathBuf {
    std::path::absolute(project_root).unwrap_or_else(|e| {
        tracing::debug!("Keeping project root {} as given: {}", project_root.display(), e);
        project_root.to_path_buf()
    })
}

/// Prepares the isolated environment and hands off to the main program.
pub struct Launcher<'a> {
    project_root: PathBuf,
    config: LaunchConfig,
    runner: &'a dyn CommandRunner,
    base_path: Vec<PathBuf>,
}

/// Read-only snapshot of the launch preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Whether the marker file exists.
    pub marker_present: bool,
    /// Whether the isolated environment exists.
    pub env_exists: bool,
    /// Whether the manifest exists.
    pub manifest_exists: bool,
    /// Dependency status; `None` when the guard fails and nothing was checked.
    pub dependencies: Option<DependencyStatus>,
}

impl Inspection {
    /// Whether a launch would go straight to delegation.
    pub fn is_ready(&self) -> bool {
        self.marker_present
            && self
                .dependencies
                .as_ref()
                .is_some_and(DependencyStatus::is_satisfied)
    }
}

impl<'a> Launcher<'a> {
    /// Create a launcher for `project_root`, searching the inherited PATH.
    ///
    /// A relative root is resolved against the current directory here, since
    /// children run with the root as their working directory.
    pub fn new(project_root: &Path, config: LaunchConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            project_root: absolute_root(project_root),
            config,
            runner,
            base_path: system_path(),
        }
    }

    /// Replace the search path that activation builds upon.
    pub fn with_base_path(mut self, base_path: Vec<PathBuf>) -> Self {
        self.base_path = base_path;
        self
    }

    /// The launch profile in use.
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// The isolated environment this launcher manages.
    pub fn isolated_env(&self) -> IsolatedEnv {
        IsolatedEnv::new(&self.project_root, &self.config.env_dir)
    }

    /// Absolute path of the dependency manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.config.manifest)
    }

    /// Confirm we are in the project root by finding the marker file.
    pub fn guard(&self) -> Result<()> {
        if self.project_root.join(&self.config.marker).is_file() {
            Ok(())
        } else {
            Err(VenvoyError::WrongDirectory {
                marker: self.config.marker.clone(),
                expected: self.config.expected_dir.clone(),
            })
        }
    }

    fn base_options(&self) -> CommandOptions {
        CommandOptions {
            cwd: Some(self.project_root.clone()),
            ..Default::default()
        }
    }

    fn activated_options(&self, activation: &Activation) -> Result<CommandOptions> {
        let mut options = self.base_options();
        activation.apply(&mut options)?;
        Ok(options)
    }

    /// Check the configured dependencies inside an activated environment.
    ///
    /// Without an environment the check is skipped: the system interpreter
    /// never counts, since the delegate always runs isolated.
    pub fn check_dependencies(
        &self,
        activation: Option<&Activation>,
    ) -> Result<DependencyStatus> {
        let Some(activation) = activation else {
            return Ok(DependencyStatus::EnvironmentAbsent);
        };

        let probe = DependencyProbe::new(self.config.dependencies.clone());
        let options = self.activated_options(activation)?;
        probe.check(self.runner, activation.python(), &options)
    }

    /// The delegate command, with its program resolved on the activated PATH.
    pub fn delegate_command(&self, activation: &Activation) -> CommandSpec {
        let program = &self.config.delegate.program;
        let resolved =
            resolve_program(program, activation.search_path()).unwrap_or_else(|| program.into());
        CommandSpec::new(resolved).args(self.config.delegate.args.iter().cloned())
    }

    fn delegate_options(&self, activation: &Activation) -> Result<CommandOptions> {
        let mut options = self.activated_options(activation)?;

        if let Some(env_file) = &self.config.env_file {
            let path = self.project_root.join(env_file);
            if !path.is_file() {
                tracing::warn!("Env file {} not found, skipping", path.display());
            }
            let vars = EnvFileParser::load_optional(&path)?;
            tracing::debug!("Forwarding {} variables from {}", vars.len(), env_file.display());
            options.env.extend(vars);
        }

        options
            .env
            .extend(self.config.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(options)
    }

    fn remediation_options(
        &self,
        activation: Option<&Activation>,
        capture: bool,
    ) -> Result<CommandOptions> {
        let mut options = match activation {
            Some(a) => self.activated_options(a)?,
            None => self.base_options(),
        };
        options.capture = capture;
        Ok(options)
    }

    /// Run the full launch sequence.
    ///
    /// Under `dry_run` the guard and dependency check still run, but nothing
    /// is created, installed or delegated; the returned plan lists what
    /// would have happened.
    pub fn launch(&self, ui: &mut dyn UserInterface, dry_run: bool) -> Result<LaunchReport> {
        let mut plan = LaunchPlan::new();

        self.guard()?;
        plan.push(LaunchStep::Guard {
            marker: self.config.marker.clone(),
        });

        let env = self.isolated_env();
        let mut activation = if env.exists() {
            plan.push(LaunchStep::Activate {
                env: env.root().to_path_buf(),
            });
            Some(env.activate(self.base_path.clone()))
        } else {
            tracing::debug!("No environment at {}", env.root().display());
            None
        };

        let status = self.check_dependencies(activation.as_ref())?;
        plan.push(LaunchStep::CheckDependencies {
            status: status.clone(),
        });

        if status.needs_install() {
            let manifest = self.manifest_path();
            if !manifest.is_file() {
                return Err(VenvoyError::ManifestNotFound { path: manifest });
            }

            let capture = !ui.output_mode().shows_command_output();
            match &status {
                DependencyStatus::EnvironmentAbsent => {
                    ui.message(&format!(
                        "Creating environment in {}...",
                        self.config.env_dir.display()
                    ));
                }
                missing => ui.message(&format!("Dependency check: {}. Installing...", missing)),
            }

            let active = match activation.take() {
                Some(active) => active,
                None => {
                    if !dry_run {
                        self.create_environment(ui, &env, capture)?;
                    }
                    plan.push(LaunchStep::CreateEnvironment {
                        env: env.root().to_path_buf(),
                    });
                    plan.push(LaunchStep::Activate {
                        env: env.root().to_path_buf(),
                    });
                    env.activate(self.base_path.clone())
                }
            };

            if !dry_run {
                self.install(ui, &active, &manifest, capture)?;
            }
            plan.push(LaunchStep::Install {
                manifest: self.config.manifest.clone(),
            });

            if !dry_run {
                let verified = self.check_dependencies(Some(&active))?;
                plan.push(LaunchStep::Verify {
                    status: verified.clone(),
                });
                if verified.needs_install() {
                    let modules = match verified.missing_modules() {
                        [] => self.config.dependencies.clone(),
                        named => named.to_vec(),
                    };
                    return Err(VenvoyError::DependencyUnresolved { modules });
                }
            }

            activation = Some(active);
        }

        let activation = activation.unwrap_or_else(|| env.activate(self.base_path.clone()));
        let command = self.delegate_command(&activation);
        plan.push(LaunchStep::Delegate {
            command: command.to_string(),
        });

        if dry_run {
            return Ok(LaunchReport {
                plan,
                exit_code: None,
            });
        }

        let options = self.delegate_options(&activation)?;
        tracing::info!("Launching {}", command);
        let result = self.runner.run(&command, &options)?;
        let exit_code = result.propagated_code();
        if !result.success {
            tracing::debug!("Delegate exited with {}", exit_code);
        }

        Ok(LaunchReport {
            plan,
            exit_code: Some(exit_code),
        })
    }

    fn create_environment(
        &self,
        ui: &mut dyn UserInterface,
        env: &IsolatedEnv,
        capture: bool,
    ) -> Result<()> {
        let interpreter = resolve_program(&self.config.interpreter, &self.base_path)
            .unwrap_or_else(|| PathBuf::from(&self.config.interpreter));
        let options = self.remediation_options(None, capture)?;

        let mut spinner = ui.start_spinner(&format!("Creating {}", self.config.env_dir.display()));
        match requirements::create_environment(self.runner, &interpreter, env, &options) {
            Ok(()) => {
                spinner.finish_success(&format!("Created {}", self.config.env_dir.display()));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Environment creation failed");
                Err(e)
            }
        }
    }

    fn install(
        &self,
        ui: &mut dyn UserInterface,
        activation: &Activation,
        manifest: &Path,
        capture: bool,
    ) -> Result<()> {
        let options = self.remediation_options(Some(activation), capture)?;

        let mut spinner =
            ui.start_spinner(&format!("Installing from {}", self.config.manifest.display()));
        match requirements::install_manifest(self.runner, activation.python(), manifest, &options) {
            Ok(()) => {
                spinner.finish_success("Dependencies installed");
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Dependency installation failed");
                Err(e)
            }
        }
    }

    /// Inspect the preconditions without changing anything.
    pub fn inspect(&self) -> Result<Inspection> {
        let env = self.isolated_env();
        let marker_present = self.guard().is_ok();

        let dependencies = if marker_present {
            let activation = env.exists().then(|| env.activate(self.base_path.clone()));
            Some(self.check_dependencies(activation.as_ref())?)
        } else {
            None
        };

        Ok(Inspection {
            marker_present,
            env_exists: env.exists(),
            manifest_exists: self.manifest_path().is_file(),
            dependencies,
        })
    }
}
