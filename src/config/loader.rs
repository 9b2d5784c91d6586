//! Configuration file discovery and loading.
//!
//! A project may carry a `.venvoy.yml` at its root. When none exists the
//! built-in profile is used unchanged.

use crate::config::schema::LaunchConfig;
use crate::error::{Result, VenvoyError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = ".venvoy.yml";

/// Find the project config file, if present.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load the launch profile for a project.
///
/// An explicit path must exist. Without one, `.venvoy.yml` in the project
/// root is used if present, otherwise the defaults.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit path is missing.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if the resolved profile is unusable.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<LaunchConfig> {
    let path = match explicit {
        Some(p) => {
            let p = if p.is_absolute() {
                p.to_path_buf()
            } else {
                project_root.join(p)
            };
            Some(p)
        }
        None => find_project_config(project_root),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            LaunchConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<LaunchConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VenvoyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VenvoyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a launch profile.
///
/// Empty or comment-only content yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<LaunchConfig> {
    let has_content = content
        .lines()
        .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'));
    if !has_content {
        return Ok(LaunchConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| VenvoyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Check that a profile can drive a launch.
///
/// Dependency names are spliced into an `import` statement, so they must
/// be dotted identifiers.
pub fn validate(config: &LaunchConfig) -> Result<()> {
    let invalid = |message: String| Err(VenvoyError::ConfigValidationError { message });

    for (field, path) in [
        ("marker", &config.marker),
        ("env_dir", &config.env_dir),
        ("manifest", &config.manifest),
    ] {
        if path.as_os_str().is_empty() {
            return invalid(format!("'{}' must not be empty", field));
        }
    }

    if config.interpreter.trim().is_empty() {
        return invalid("'interpreter' must not be empty".to_string());
    }

    if config.delegate.program.trim().is_empty() {
        return invalid("'delegate.program' must not be empty".to_string());
    }

    if config.dependencies.is_empty() {
        return invalid("'dependencies' must list at least one module".to_string());
    }

    for dep in &config.dependencies {
        if !is_module_name(dep) {
            return invalid(format!("'{}' is not a valid module name", dep));
        }
    }

    Ok(())
}

fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
