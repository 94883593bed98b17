//! Configuration management for Grayline.
//!
//! Configuration is read from `$GRAYLINE_CONFIG` or the platform config
//! directory. Only a missing platform file falls back to defaults; a missing
//! explicit file is an error.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GRAYLINE_CONFIG";

/// Root configuration structure for Grayline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Execution settings
    pub pipeline: PipelineConfig,

    /// Source list and destination rule
    pub paths: PathsConfig,

    /// Resize settings
    pub transform: TransformConfig,

    /// Encoding settings
    pub output: OutputConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if no `$GRAYLINE_CONFIG` is set and the
    /// platform file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_explicit_or_default(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    fn load_explicit_or_default(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(&path);
        }
        let path = Self::platform_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the config file path.
    ///
    /// `$GRAYLINE_CONFIG` wins when set. Otherwise uses platform-appropriate
    /// directories:
    /// - macOS: ~/Library/Application Support/com.grayline.grayline/config.toml
    /// - Linux: ~/.config/grayline/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\grayline\config\config.toml
    ///
    /// Falls back to ~/.grayline/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(explicit) => PathBuf::from(explicit),
            None => Self::platform_path(),
        }
    }

    fn platform_path() -> PathBuf {
        directories::ProjectDirs::from("com", "grayline", "grayline")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".grayline").join("config.toml")
            })
    }

    /// Source paths with `~` expanded, in configured order.
    pub fn sources(&self) -> Vec<String> {
        self.paths
            .sources
            .iter()
            .map(|s| shellexpand::tilde(s).into_owned())
            .collect()
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
