//! Launch profile configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Dotenv parsing in [`env_file`]
//!
//! # Example
//!
//! ```
//! use venvoy::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".venvoy.yml"), "env_dir: .venv").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.env_dir, std::path::PathBuf::from(".venv"));
//! ```

pub mod env_file;
pub mod loader;
pub mod schema;

pub use env_file::EnvFileParser;
pub use loader::{
    find_project_config, load_config, load_config_file, parse_config, validate, CONFIG_FILE_NAME,
};
pub use schema::{DelegateConfig, LaunchConfig};
