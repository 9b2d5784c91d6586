//! Dependency detection and installation.
//!
//! # Modules
//!
//! - [`probe`] - Import check for the configured modules
//! - [`status`] - Dependency status returned by the probe
//! - [`installer`] - Environment creation and manifest installation

pub mod installer;
pub mod probe;
pub mod status;

pub use installer::{create_environment, install_manifest};
pub use probe::DependencyProbe;
pub use status::DependencyStatus;
