//! Common error types for shelf
//!
//! Normalization and grouping are total and never fail. These errors belong
//! to the collaborators around them: loading records, reading configuration
//! and writing the report.

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for shelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across shelf tools
#[derive(Error, Debug)]
pub enum Error {
    /// Record file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record file is not a valid JSON array of records
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
