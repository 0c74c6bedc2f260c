//! Configuration loader

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::SwitchToken;

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILENAME: &str = ".paperlint.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Exit non-zero when any active finding is reported
    #[serde(default)]
    pub strict: bool,

    /// File extensions picked up when a directory is checked
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from directory discovery
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Switches replayed before the command-line ones
    #[serde(default)]
    pub switches: Vec<SwitchToken>,
}

fn default_extensions() -> Vec<String> {
    vec!["tex".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            extensions: default_extensions(),
            exclude: Vec::new(),
            switches: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file or return default
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load an explicitly given file, or fall back to [`Config::load_or_default`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), switches = config.switches.len(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Compile the exclude patterns
    pub fn exclude_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: self.exclude.join(", "),
            source: e,
        })
    }

    /// Whether `path` carries one of the configured extensions
    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|wanted| wanted == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.strict);
        assert_eq!(config.extensions, vec!["tex"]);
        assert!(config.switches.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
strict = true
extensions = ["tex", "ltx"]
exclude = ["build/**"]
switches = [{ include = "all" }, { exclude = "visual" }, { include = "hline" }]
"#;
        let config: Config = toml::from_str(content).unwrap();

        assert!(config.strict);
        assert_eq!(config.extensions, vec!["tex", "ltx"]);
        assert_eq!(
            config.switches,
            vec![
                SwitchToken::include("all"),
                SwitchToken::exclude("visual"),
                SwitchToken::include("hline"),
            ]
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: Config = toml::from_str("strict = true").unwrap();
        assert_eq!(config.extensions, vec!["tex"]);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let result: Result<Config, _> = toml::from_str(r#"switches = [{ toggle = "all" }]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict = true").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/.paperlint.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            strict: true,
            exclude: vec!["drafts/**".to_string()],
            switches: vec![SwitchToken::exclude("style")],
            ..Config::default()
        };
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_exclude_matcher() {
        let config = Config {
            exclude: vec!["drafts/**".to_string(), "*.bak.tex".to_string()],
            ..Config::default()
        };
        let matcher = config.exclude_matcher().unwrap();
        assert!(matcher.is_match("drafts/old.tex"));
        assert!(matcher.is_match("paper.bak.tex"));
        assert!(!matcher.is_match("paper.tex"));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let config = Config {
            exclude: vec!["[".to_string()],
            ..Config::default()
        };
        assert!(matches!(
            config.exclude_matcher(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_has_extension() {
        let config = Config::default();
        assert!(config.has_extension(Path::new("paper.tex")));
        assert!(!config.has_extension(Path::new("paper.bib")));
        assert!(!config.has_extension(Path::new("Makefile")));
    }
}
