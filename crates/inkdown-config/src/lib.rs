//! Configuration management for inkdown.
//!
//! Parses `inkdown.toml` files with serde and provides auto-discovery of
//! config files in parent directories. Converter settings live at the top
//! level of the file and deserialize into
//! [`ConverterConfig`](inkdown_convert::ConverterConfig):
//!
//! ```toml
//! backend = "comrak"
//! extension_pattern = "markdown,mkdn,md"
//!
//! [comrak]
//! auto_ids = true
//! footnotes = true
//! ```
//!
//! Loading validates the backend identifier against the known set, so a
//! typo fails here with a configuration error instead of surfacing later
//! at first conversion.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use inkdown_convert::{Backend, ConverterConfig};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "inkdown.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Converter settings (top-level keys of the config file).
    #[serde(flatten)]
    pub converter: ConverterConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `inkdown.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, or if
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.validate()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the backend identifier is
    /// unknown or the extension pattern has no usable tokens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Backend::parse(&self.converter.backend).is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown backend `{}` (valid backends: {})",
                self.converter.backend,
                Backend::VALID_NAMES
            )));
        }
        let has_token = self
            .converter
            .extension_pattern
            .split(',')
            .any(|token| !token.trim().is_empty());
        if !has_token {
            return Err(ConfigError::Validation(
                "extension_pattern must contain at least one extension token".to_owned(),
            ));
        }
        Ok(())
    }
}
