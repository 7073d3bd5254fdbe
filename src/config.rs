//! Configuration module for pretty-callback
//!
//! Handles loading and merging reporter configuration from multiple sources:
//! - Default values
//! - User configuration (~/.config/pretty-callback/config.toml)
//! - Project configuration (./pretty-callback.toml)
//! - Environment variables
//! - Command-line arguments (applied by the binary)
//!
//! # Environment Variables
//!
//! - `NO_COLOR`, `ANSIBLE_NOCOLOR`, `PRETTY_NO_COLOR` - disable colored output
//! - `ANSIBLE_NO_EMOJI`, `PRETTY_NO_EMOJI` - disable emoji markers
//! - `PRETTY_CLOSING_MESSAGE` - replace the line printed after the summary
//! - `PRETTY_CALLBACK_CONFIG` - explicit configuration file path
//!
//! A flag variable counts as set when it is present and non-empty.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::callback::status::FeatureFlags;
use crate::error::{Error, Result};

/// Default interior width of the play banner box.
pub const DEFAULT_MIN_BOX_WIDTH: usize = 38;

/// Default cap, in characters, for failure detail blocks.
pub const DEFAULT_TRUNCATE_AT: usize = 2000;

/// Default line printed after the end-of-run summary.
pub const DEFAULT_CLOSING_MESSAGE: &str = "Setup complete.";

/// Reporter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Disable colored output
    pub no_color: bool,

    /// Disable emoji markers
    pub no_emoji: bool,

    /// Informational line rendered after the summary
    pub closing_message: String,

    /// Minimum interior width of the play banner box
    pub min_box_width: usize,

    /// Character cap for msg/stdout/stderr detail blocks
    pub truncate_at: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            no_emoji: false,
            closing_message: DEFAULT_CLOSING_MESSAGE.to_string(),
            min_box_width: DEFAULT_MIN_BOX_WIDTH,
            truncate_at: DEFAULT_TRUNCATE_AT,
        }
    }
}

/// One configuration file; keys it leaves out keep the lower layer's value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    no_color: Option<bool>,
    no_emoji: Option<bool>,
    closing_message: Option<String>,
    min_box_width: Option<usize>,
    truncate_at: Option<usize>,
}

impl ReporterConfig {
    /// Load configuration from files and environment.
    ///
    /// An explicit path that does not exist is an error; the standard
    /// locations are only consulted when present.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = ReporterConfig::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::config_load(path, "file does not exist"));
            }
        }

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                debug!(path = %path.display(), "loading reporter config");
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a single file, without environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ReporterConfig::default().merge_from_file(path.as_ref())
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pretty-callback").join("config.toml"));
        }

        paths.push(PathBuf::from("pretty-callback.toml"));

        if let Ok(env_config) = std::env::var("PRETTY_CALLBACK_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config_load(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: ConfigFile = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .map_err(|e| Error::config_load(path, e.to_string()))?,
            "json" => serde_json::from_str(&content)
                .map_err(|e| Error::config_load(path, e.to_string()))?,
            "toml" => {
                toml::from_str(&content).map_err(|e| Error::config_load(path, e.to_string()))?
            }
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| Error::config_load(path, e.to_string()))?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge a file layer into this one; every key the file sets wins.
    fn merge(&self, other: ConfigFile) -> ReporterConfig {
        ReporterConfig {
            no_color: other.no_color.unwrap_or(self.no_color),
            no_emoji: other.no_emoji.unwrap_or(self.no_emoji),
            closing_message: other
                .closing_message
                .unwrap_or_else(|| self.closing_message.clone()),
            min_box_width: other.min_box_width.unwrap_or(self.min_box_width),
            truncate_at: other.truncate_at.unwrap_or(self.truncate_at),
        }
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if ["NO_COLOR", "ANSIBLE_NOCOLOR", "PRETTY_NO_COLOR"]
            .iter()
            .any(|name| env_flag(name))
        {
            self.no_color = true;
        }

        if ["ANSIBLE_NO_EMOJI", "PRETTY_NO_EMOJI"]
            .iter()
            .any(|name| env_flag(name))
        {
            self.no_emoji = true;
        }

        if let Ok(message) = std::env::var("PRETTY_CLOSING_MESSAGE") {
            self.closing_message = message;
        }
    }

    /// The immutable feature flags this configuration resolves to.
    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags::new(self.no_color, self.no_emoji)
    }
}

/// True when the variable is present and non-empty.
pub(crate) fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
}
