//! Error types for venvoy operations.
//!
//! This module defines [`VenvoyError`], the primary error type used throughout
//! the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VenvoyError` for launch failures that map to a distinct exit code
//! - Use `anyhow::Error` (via `VenvoyError::Other`) for unexpected errors
//! - A missing dependency is not an error; it triggers installation

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venvoy operations.
#[derive(Debug, Error)]
pub enum VenvoyError {
    /// The marker file is absent, so we are not in the project root.
    #[error("{marker} not found. Please run this from the {expected} directory.")]
    WrongDirectory { marker: PathBuf, expected: String },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Installation is needed but the manifest is missing.
    #[error("Dependency manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Creating the isolated environment failed.
    #[error("Failed to create environment at {path}{}", describe_code(.code))]
    EnvironmentCreateFailed {
        path: PathBuf,
        code: Option<i32>,
        output: String,
    },

    /// The installer exited unsuccessfully.
    #[error("Installing from {manifest} failed{}", describe_code(.code))]
    InstallFailed {
        manifest: PathBuf,
        code: Option<i32>,
        output: String,
    },

    /// Dependencies still do not resolve after installation.
    #[error("Dependencies still unresolved after install: {}", .modules.join(", "))]
    DependencyUnresolved { modules: Vec<String> },

    /// A command could not be spawned or waited on.
    #[error("Failed to run {command}{}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VenvoyError {
    /// Process exit code to report for this error.
    ///
    /// Failures of an underlying tool surface that tool's own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EnvironmentCreateFailed { code, .. } | Self::InstallFailed { code, .. } => {
                code.filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }

    /// Captured tool output attached to the error, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Self::EnvironmentCreateFailed { output, .. } | Self::InstallFailed { output, .. }
                if !output.trim().is_empty() =>
            {
                Some(output.as_str())
            }
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

/// Result type alias for venvoy operations.
pub type Result<T> = std::result::Result<T, VenvoyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_directory_names_marker_and_expected_dir() {
        let err = VenvoyError::WrongDirectory {
            marker: PathBuf::from("src/smugmug-client.py"),
            expected: "smugmug-client".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("src/smugmug-client.py"));
        assert!(msg.contains("smugmug-client directory"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn install_failed_surfaces_installer_code() {
        let err = VenvoyError::InstallFailed {
            manifest: PathBuf::from("requirements.txt"),
            code: Some(2),
            output: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Installing from requirements.txt failed with exit code 2"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn install_failed_without_code_exits_one() {
        let err = VenvoyError::InstallFailed {
            manifest: PathBuf::from("requirements.txt"),
            code: None,
            output: String::new(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.captured_output().is_none());
    }

    #[test]
    fn environment_create_failed_surfaces_code() {
        let err = VenvoyError::EnvironmentCreateFailed {
            path: PathBuf::from("venv"),
            code: Some(3),
            output: "Error: ensurepip missing\n".into(),
        };
        assert!(err.to_string().contains("venv"));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.captured_output(), Some("Error: ensurepip missing\n"));
    }

    #[test]
    fn dependency_unresolved_lists_modules() {
        let err = VenvoyError::DependencyUnresolved {
            modules: vec!["requests".into(), "dotenv".into()],
        };
        assert!(err.to_string().contains("requests, dotenv"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn manifest_not_found_displays_path() {
        let err = VenvoyError::ManifestNotFound {
            path: PathBuf::from("/proj/requirements.txt"),
        };
        assert!(err.to_string().contains("/proj/requirements.txt"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: VenvoyError = io_err.into();
        assert!(matches!(err, VenvoyError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
