//! Isolated environment layout.

use std::path::{Path, PathBuf};

use super::Activation;
use crate::shell::platform::executable_name;

/// A self-contained Python environment directory (a `venv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedEnv {
    root: PathBuf,
}

impl IsolatedEnv {
    /// Environment at `env_dir`, resolved against the project root.
    pub fn new(project_root: &Path, env_dir: &Path) -> Self {
        Self {
            root: project_root.join(env_dir),
        }
    }

    /// Environment root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the environment directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Directory holding the environment's executables.
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// The environment's own interpreter.
    pub fn python(&self) -> PathBuf {
        self.bin_dir().join(executable_name("python"))
    }

    /// Activation of this environment layered over `base_path`.
    pub fn activate(&self, base_path: Vec<PathBuf>) -> Activation {
        Activation::new(self, base_path)
    }
}
