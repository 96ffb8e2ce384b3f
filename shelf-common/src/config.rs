//! Configuration loading and input resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file at the default location is not an error; a file
//! named explicitly must exist and parse.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Record file used when nothing else names one
pub const DEFAULT_INPUT: &str = "data01.json";

/// Environment variable naming the record file
pub const INPUT_ENV_VAR: &str = "SHELF_INPUT";

/// Environment variable naming the log level
pub const LOG_LEVEL_ENV_VAR: &str = "SHELF_LOG_LEVEL";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Record file to group
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Write the report as compact JSON
    #[serde(default)]
    pub compact: bool,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigSource::CommandLine => "command line",
            ConfigSource::Environment => "environment",
            ConfigSource::ConfigFile => "config file",
            ConfigSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// Default configuration file path for the platform
///
/// `~/.config/shelf/config.toml` on Linux, the platform config directory
/// elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelf").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))
}

/// Load the config file, if any
///
/// Returns the config together with the file it came from. With no explicit
/// path, a missing default file yields the built-in defaults and `None`.
pub fn load_config(explicit: Option<&Path>) -> Result<(TomlConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((load_toml_config(path)?, Some(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok((load_toml_config(&path)?, Some(path))),
        _ => Ok((TomlConfig::default(), None)),
    }
}

/// Resolve the record file: CLI > `SHELF_INPUT` > TOML > `data01.json`
pub fn resolve_input(cli_arg: Option<&Path>, config: &TomlConfig) -> (PathBuf, ConfigSource) {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return (path.to_path_buf(), ConfigSource::CommandLine);
    }

    // Priority 2: Environment variable
    if let Some(path) = env_value(INPUT_ENV_VAR) {
        return (PathBuf::from(path), ConfigSource::Environment);
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.input {
        return (path.clone(), ConfigSource::ConfigFile);
    }

    // Priority 4: Compiled default
    (PathBuf::from(DEFAULT_INPUT), ConfigSource::Default)
}

/// Resolve the log level: CLI > `SHELF_LOG_LEVEL` > TOML (defaults to `info`)
pub fn resolve_log_level(cli_arg: Option<&str>, config: &TomlConfig) -> String {
    cli_arg
        .map(str::to_string)
        .or_else(|| env_value(LOG_LEVEL_ENV_VAR))
        .unwrap_or_else(|| config.logging.level.clone())
}

/// Non-blank value of an environment variable
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
