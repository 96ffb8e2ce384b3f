//! Run settings for shelf-match
//!
//! Combines command-line overrides with the environment and the TOML config
//! file using the priority order from `shelf_common::config`.

use crate::reporter::OutputFormat;
use shelf_common::config::{load_config, resolve_input, resolve_log_level, ConfigSource};
use shelf_common::Result;
use std::path::PathBuf;

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input: Option<PathBuf>,
    pub compact: bool,
    pub log_level: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Record file to group
    pub input: PathBuf,

    /// Where `input` came from
    pub input_source: ConfigSource,

    /// Report layout
    pub format: OutputFormat,

    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,

    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from overrides, environment and config file
    ///
    /// # Errors
    /// Returns [`shelf_common::Error::Config`] if a config file exists but
    /// cannot be read or parsed, or if an explicitly named one is missing.
    pub fn resolve(overrides: SettingsOverrides) -> Result<Self> {
        let (config, config_file) = load_config(overrides.config_file.as_deref())?;

        let (input, input_source) = resolve_input(overrides.input.as_deref(), &config);
        let log_level = resolve_log_level(overrides.log_level.as_deref(), &config);

        // --compact can only switch compact output on
        let format = OutputFormat::from_compact(overrides.compact || config.compact);

        Ok(Self {
            input,
            input_source,
            format,
            log_level,
            config_file,
        })
    }

    /// Settings for grouping `input` with everything else at its default
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            input_source: ConfigSource::CommandLine,
            format: OutputFormat::Pretty,
            log_level: "info".to_string(),
            config_file: None,
        }
    }
}
