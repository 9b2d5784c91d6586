//! Environment activation as a value.
//!
//! Activating a `venv` from a shell rewrites `PATH`, sets `VIRTUAL_ENV` and
//! unsets `PYTHONHOME` for the rest of the session. Here the same changes are
//! captured in an [`Activation`] and applied to each child command
//! individually.

use anyhow::Context;
use std::path::{Path, PathBuf};

use super::IsolatedEnv;
use crate::error::Result;
use crate::shell::CommandOptions;

/// Variables an activated environment must not inherit.
const CLEARED_VARS: &[&str] = &["PYTHONHOME"];

/// The resolved effect of activating an isolated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    env_root: PathBuf,
    bin_dir: PathBuf,
    python: PathBuf,
    search_path: Vec<PathBuf>,
}

impl Activation {
    /// Activate `env`, prepending its bin directory to `base_path`.
    pub fn new(env: &IsolatedEnv, base_path: Vec<PathBuf>) -> Self {
        let bin_dir = env.bin_dir();
        let mut search_path = vec![bin_dir.clone()];
        search_path.extend(base_path.into_iter().filter(|p| *p != bin_dir));

        Self {
            env_root: env.root().to_path_buf(),
            python: env.python(),
            bin_dir,
            search_path,
        }
    }

    /// Root of the activated environment.
    pub fn env_root(&self) -> &Path {
        &self.env_root
    }

    /// Bin directory that now leads the search path.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Interpreter inside the environment.
    pub fn python(&self) -> &Path {
        &self.python
    }

    /// Executable search path with the environment first.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Apply the activation to a child command's options.
    pub fn apply(&self, options: &mut CommandOptions) -> Result<()> {
        let joined = std::env::join_paths(&self.search_path)
            .context("environment bin directory cannot be placed on PATH")?;

        options.env.insert(
            "VIRTUAL_ENV".to_string(),
            self.env_root.to_string_lossy().to_string(),
        );
        options
            .env
            .insert("PATH".to_string(), joined.to_string_lossy().to_string());
        for var in CLEARED_VARS {
            options.env.remove(*var);
            if !options.env_remove.iter().any(|v| v == var) {
                options.env_remove.push(var.to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> IsolatedEnv {
        IsolatedEnv::new(Path::new("/proj"), Path::new("venv"))
    }

    #[test]
    fn bin_dir_leads_search_path() {
        let activation = env().activate(vec![PathBuf::from("/usr/bin")]);
        assert_eq!(activation.search_path()[0], env().bin_dir());
        assert_eq!(activation.search_path()[1], PathBuf::from("/usr/bin"));
    }

    #[test]
    fn bin_dir_not_duplicated() {
        let activation = env().activate(vec![env().bin_dir(), PathBuf::from("/usr/bin")]);
        assert_eq!(activation.search_path().len(), 2);
    }

    #[test]
    fn apply_sets_virtual_env_and_path() {
        let activation = env().activate(vec![PathBuf::from("/usr/bin")]);
        let mut options = CommandOptions::default();
        activation.apply(&mut options).unwrap();

        assert_eq!(
            options.env.get("VIRTUAL_ENV"),
            Some(&env().root().to_string_lossy().to_string())
        );
        let path = options.env.get("PATH").unwrap();
        let first = std::env::split_paths(path).next().unwrap();
        assert_eq!(first, env().bin_dir());
        assert!(options.env_remove.contains(&"PYTHONHOME".to_string()));
    }

    #[test]
    fn apply_twice_does_not_duplicate_removals() {
        let activation = env().activate(vec![]);
        let mut options = CommandOptions::default();
        activation.apply(&mut options).unwrap();
        activation.apply(&mut options).unwrap();
        assert_eq!(options.env_remove.len(), 1);
    }

    #[test]
    fn python_lives_in_bin_dir() {
        let activation = env().activate(vec![]);
        assert_eq!(activation.python().parent(), Some(activation.bin_dir()));
    }
}
