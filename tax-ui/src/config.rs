//! Optional TOML configuration for `tax-compare`.
//!
//! ```toml
//! salaried = true
//! log_level = "debug"
//! log_file = "tax-compare.log"
//! regimes_file = "regimes.csv"
//! earlier = "2425"
//! later = "2526"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether the standard deduction applies unless overridden.
    pub salaried: bool,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Extra regimes merged over the built-in fiscal years.
    pub regimes_file: Option<PathBuf>,
    pub earlier: String,
    pub later: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            salaried: true,
            log_level: None,
            log_file: None,
            regimes_file: None,
            earlier: "2425".to_string(),
            later: "2526".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads a config file. Relative paths inside it are resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.log_file = config.log_file.map(|p| dir.join(p));
            config.regimes_file = config.regimes_file.map(|p| dir.join(p));
        }
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
