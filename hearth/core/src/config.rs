//! TOML Configuration File Support
//!
//! This module provides centralized configuration loading for Ember,
//! supporting a TOML configuration file at `~/.config/ember/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file follows XDG Base Directory specification:
//! - `$XDG_CONFIG_HOME/ember/config.toml` (typically `~/.config/ember/config.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [generator]
//! api_key = "AIza..."
//! model = "gemini-3-flash-preview"
//!
//! [audio]
//! enabled = true
//!
//! [storage]
//! dir = "/home/me/.local/share/ember"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::DEFAULT_MODEL;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Generator section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorToml {
    /// Gemini API key
    pub api_key: Option<String>,

    /// Model identifier to request
    pub model: Option<String>,
}

/// Audio section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioToml {
    /// Whether cues and ambience play at all
    pub enabled: Option<bool>,
}

/// Storage section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageToml {
    /// Directory for snapshot files
    pub dir: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmberToml {
    /// Generator configuration section
    pub generator: GeneratorToml,

    /// Audio configuration section
    pub audio: AudioToml,

    /// Storage configuration section
    pub storage: StorageToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Centralized configuration for Ember
///
/// This struct consolidates configuration from every source and tracks where
/// the values came from. Use [`load_config`] to load it with proper priority
/// handling.
#[derive(Clone, Debug)]
pub struct EmberConfigFile {
    /// Gemini API key, if one is configured anywhere
    pub api_key: Option<String>,

    /// Model identifier to request
    pub model: String,

    /// Whether cues and ambience play at all
    pub audio_enabled: bool,

    /// Snapshot directory override
    pub data_dir: Option<PathBuf>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Where the generator credential and model came from
    source: ConfigSource,
}

impl Default for EmberConfigFile {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            audio_enabled: true,
            data_dir: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl EmberConfigFile {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the generator credential and model came from
    ///
    /// The audio and storage toggles never change this; they are ancillary
    /// to the values diagnostics report on.
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/ember/config.toml` or
/// `~/.config/ember/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ember").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// Priority order (highest first):
/// 1. Environment variables
/// 2. TOML configuration file
/// 3. Default values
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<EmberConfigFile, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only
///   defaults and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<EmberConfigFile, ConfigError> {
    // Start with defaults
    let mut config = EmberConfigFile::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: EmberToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config);

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut EmberConfigFile, toml: &EmberToml) {
    if let Some(ref key) = toml.generator.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(ref model) = toml.generator.model {
        config.model = model.clone();
    }
    if let Some(enabled) = toml.audio.enabled {
        config.audio_enabled = enabled;
    }
    if let Some(ref dir) = toml.storage.dir {
        config.data_dir = Some(dir.clone());
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut EmberConfigFile) {
    apply_env_overrides(config, &|name| std::env::var(name).ok());
}

/// Apply environment overrides through a lookup, so tests can inject
///
/// Only the credential and model promote `source` to `Env`; the audio and
/// storage overrides leave the reported provenance alone.
fn apply_env_overrides(config: &mut EmberConfigFile, var: &dyn Fn(&str) -> Option<String>) {
    if let Some(key) = var("GEMINI_API_KEY") {
        if !key.trim().is_empty() {
            config.api_key = Some(key);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(model) = var("EMBER_MODEL") {
        if !model.trim().is_empty() {
            config.model = model;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(audio) = var("EMBER_AUDIO") {
        config.audio_enabled = audio != "0" && audio.to_lowercase() != "false";
    }
    if let Some(dir) = var("EMBER_DATA_DIR") {
        if !dir.trim().is_empty() {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
