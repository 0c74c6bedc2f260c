//! Error types for paperlint
//!
//! This module defines custom error types using `thiserror`. Problems inside a
//! document never surface here: they become findings. These errors cover the
//! configuration surface and the loading of documents.

use thiserror::Error;

/// Main error type for paperlint
#[derive(Error, Debug)]
pub enum PaperlintError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scan-related errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Failed to render results
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Failed to write a file
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        /// Path of the file that could not be written
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Errors in the configuration file or the switch list
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A switch names neither a category nor a rule
    #[error("Unknown switch '{0}'")]
    UnknownSwitch(String),

    /// An exclude pattern is not a valid glob
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The underlying glob error
        source: globset::Error,
    },
}

/// Errors that occur while discovering or loading documents
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to read a file
    #[error("Could not open '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The given path does not exist
    #[error("Path '{0}' does not exist")]
    MissingPath(String),

    /// Directory traversal failed
    #[error("Failed to walk '{path}': {source}")]
    Walk {
        /// Root of the traversal
        path: String,
        /// The underlying walker error
        source: ignore::Error,
    },
}
