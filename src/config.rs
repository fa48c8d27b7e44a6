use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LaunchError;
use crate::keywords::{DEFAULT_KEYWORDS_FILE, DEFAULT_LINE_LIMIT, DEFAULT_MAX_TERMS};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keywords: KeywordsConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    pub path: PathBuf,
    pub line_limit: usize,
    pub max_terms: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub opener: Option<String>, // e.g., "firefox --new-tab"
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_KEYWORDS_FILE),
            line_limit: DEFAULT_LINE_LIMIT,
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scholar_launcher")
            .join("config.toml")
    }

    /// Loads the user config, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self, LaunchError> {
        Self::load_or_default(&Self::config_path())
    }

    fn load_or_default(path: &Path) -> Result<Self, LaunchError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Self::load_from(path)
    }

    /// Loads an explicitly named config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, LaunchError> {
        let contents = fs::read_to_string(path).map_err(|source| LaunchError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            toml::from_str(&contents).map_err(|source| LaunchError::ConfigInvalid {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
