//! Isolated environment handling.
//!
//! - [`isolated`] - On-disk layout of a `venv`
//! - [`activation`] - Activation as an explicit value applied to child commands

pub mod activation;
pub mod isolated;

pub use activation::Activation;
pub use isolated::IsolatedEnv;
