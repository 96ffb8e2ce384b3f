//! Record loading
//!
//! Reads a JSON array of `{title, supermarket}` objects. Read failures and
//! parse failures are reported separately; either one ends the run before any
//! grouping happens.

use shelf_common::{Error, Record, Result};
use std::path::Path;
use tracing::{debug, info};

/// Read and parse a record file
///
/// # Errors
/// - [`Error::Read`] if the file cannot be read
/// - [`Error::Parse`] if the content is not a JSON array of records, including
///   records missing `title` or `supermarket`
pub async fn load_records(path: &Path) -> Result<Vec<Record>> {
    debug!(path = %path.display(), "Reading record file");

    let content = tokio::fs::read(path).await.map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(path, &content)?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Loaded records"
    );
    Ok(records)
}

/// Parse record file content
///
/// `path` is only used to label the error.
pub fn parse_records(path: &Path, content: &[u8]) -> Result<Vec<Record>> {
    serde_json::from_slice(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
