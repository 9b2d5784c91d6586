//! Environment creation and manifest installation.
//!
//! Both operations run once per launch. A failure is reported with the
//! underlying tool's exit code and never retried.

use std::path::Path;

use crate::environment::IsolatedEnv;
use crate::error::{Result, VenvoyError};
use crate::shell::{CommandOptions, CommandResult, CommandRunner, CommandSpec};

/// Command that creates `env` using the base `interpreter`.
pub fn create_command(interpreter: &Path, env: &IsolatedEnv) -> CommandSpec {
    CommandSpec::new(interpreter)
        .args(["-m", "venv"])
        .arg(env.root().to_string_lossy())
}

/// Command that installs everything `manifest` declares with `python`.
pub fn install_command(python: &Path, manifest: &Path) -> CommandSpec {
    CommandSpec::new(python)
        .args(["-m", "pip", "install", "-r"])
        .arg(manifest.to_string_lossy())
}

/// Create the isolated environment.
pub fn create_environment(
    runner: &dyn CommandRunner,
    interpreter: &Path,
    env: &IsolatedEnv,
    options: &CommandOptions,
) -> Result<()> {
    let spec = create_command(interpreter, env);
    tracing::info!("Creating environment at {}", env.root().display());

    let result = runner.run(&spec, options)?;
    if result.success {
        Ok(())
    } else {
        Err(VenvoyError::EnvironmentCreateFailed {
            path: env.root().to_path_buf(),
            code: Some(result.propagated_code()),
            output: captured_output(&result),
        })
    }
}

fn captured_output(result: &CommandResult) -> String {
    let mut output = result.stdout.clone();
    output.push_str(&result.stderr);
    output
}

/// Install the manifest's dependencies into the active environment.
///
/// # Errors
///
/// Returns `ManifestNotFound` without running anything if the manifest is
/// absent, and `InstallFailed` if the installer exits non-zero.
pub fn install_manifest(
    runner: &dyn CommandRunner,
    python: &Path,
    manifest: &Path,
    options: &CommandOptions,
) -> Result<()> {
    if !manifest.is_file() {
        return Err(VenvoyError::ManifestNotFound {
            path: manifest.to_path_buf(),
        });
    }

    let spec = install_command(python, manifest);
    tracing::info!("Installing dependencies from {}", manifest.display());

    let result = runner.run(&spec, options)?;
    if result.success {
        Ok(())
    } else {
        Err(VenvoyError::InstallFailed {
            manifest: manifest.to_path_buf(),
            code: Some(result.propagated_code()),
            output: captured_output(&result),
        })
    }
}
