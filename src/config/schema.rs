//! Launch profile schema.
//!
//! Maps the optional `.venvoy.yml` file. Every field has a default, so an
//! empty or absent file yields the stock profile for the SmugMug client
//! selection tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default marker file proving we run from the project root.
pub const DEFAULT_MARKER: &str = "src/smugmug-client.py";

/// Default directory name reported by the guard.
pub const DEFAULT_EXPECTED_DIR: &str = "smugmug-client";

/// Default isolated environment directory.
pub const DEFAULT_ENV_DIR: &str = "venv";

/// Default dependency manifest.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Default base interpreter used to create the environment.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Resolved launch profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Marker file, relative to the project root.
    pub marker: PathBuf,

    /// Name of the expected directory, shown when the guard fails.
    pub expected_dir: String,

    /// Isolated environment directory, relative to the project root.
    pub env_dir: PathBuf,

    /// Dependency manifest, relative to the project root.
    pub manifest: PathBuf,

    /// Module names that must be importable.
    pub dependencies: Vec<String>,

    /// Interpreter used to create the environment.
    pub interpreter: String,

    /// Main program to hand off to.
    pub delegate: DelegateConfig,

    /// Extra variables for the delegate
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Dotenv file forwarded to the delegate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_file: Option<PathBuf>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            marker: PathBuf::from(DEFAULT_MARKER),
            expected_dir: DEFAULT_EXPECTED_DIR.to_string(),
            env_dir: PathBuf::from(DEFAULT_ENV_DIR),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            dependencies: default_dependencies(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            delegate: DelegateConfig::default(),
            env: BTreeMap::new(),
            env_file: None,
        }
    }
}

fn default_dependencies() -> Vec<String> {
    ["requests", "requests_oauthlib", "dotenv"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The program the launcher delegates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegateConfig {
    /// Program name or path. Bare names are looked up on the activated PATH.
    pub program: String,

    /// Fixed arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec![DEFAULT_MARKER.to_string()],
        }
    }
}
