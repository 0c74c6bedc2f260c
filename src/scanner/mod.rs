//! Scanner module - Document discovery
//!
//! A file argument is checked as given. A directory argument is walked
//! recursively and every file with a configured extension is checked.

mod filesystem;

use std::path::PathBuf;

use globset::GlobSet;

use crate::config::Config;
use crate::error::{ConfigError, ScanError};

/// Result of resolving the command-line paths to documents.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Documents to check, in argument order, each directory sorted
    pub documents: Vec<PathBuf>,
    /// Paths that could not be resolved; they do not stop the others
    pub errors: Vec<ScanError>,
}

/// Finds the documents to check.
pub struct Scanner {
    config: Config,
    exclude: GlobSet,
}

impl Scanner {
    /// Create a scanner from the discovery settings of `config`
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.clone(),
            exclude: config.exclude_matcher()?,
        })
    }

    /// Resolve every input path
    pub fn discover(&self, paths: &[PathBuf]) -> Discovery {
        let mut discovery = Discovery::default();

        for path in paths {
            if path.is_dir() {
                let (files, errors) = filesystem::walk_directory(path, &self.exclude, |p| {
                    self.config.has_extension(p)
                });
                tracing::info!(
                    root = %path.display(),
                    documents = files.len(),
                    "Discovered documents"
                );
                discovery.documents.extend(files);
                discovery.errors.extend(errors);
            } else if path.exists() {
                discovery.documents.push(path.clone());
            } else {
                discovery
                    .errors
                    .push(ScanError::MissingPath(path.display().to_string()));
            }
        }

        discovery
    }
}
