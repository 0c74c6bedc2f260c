//! Configuration module
//!
//! An optional `.paperlint.toml` holds the project defaults: strict mode,
//! discovery settings, and switches that run before the command-line ones.

pub mod loader;

pub use loader::{Config, CONFIG_FILENAME};
