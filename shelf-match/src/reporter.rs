//! Report output
//!
//! Writes grouping results as JSON: an array of
//! `{category, count, products: [{title, supermarket}]}` objects.

use serde::Serialize;
use shelf_common::{equality_key, normalize, Group, Result};
use std::io::Write;

/// Report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented with two spaces, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

impl OutputFormat {
    /// Pick the format from the `compact` flag
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            OutputFormat::Compact
        } else {
            OutputFormat::Pretty
        }
    }
}

/// Write the grouping result, followed by a newline
pub fn write_report<W: Write>(writer: W, groups: &[Group], format: OutputFormat) -> Result<()> {
    write_json(writer, groups, format)
}

/// How a single title normalizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalization<'a> {
    pub title: &'a str,
    pub normalized: String,
    pub equality_key: String,
}

impl<'a> Normalization<'a> {
    pub fn of(title: &'a str) -> Self {
        Self {
            title,
            normalized: normalize(title),
            equality_key: equality_key(title),
        }
    }
}

/// Write how `title` normalizes, followed by a newline
pub fn write_normalization<W: Write>(writer: W, title: &str, format: OutputFormat) -> Result<()> {
    write_json(writer, &Normalization::of(title), format)
}

fn write_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value),
        OutputFormat::Compact => serde_json::to_writer(&mut writer, value),
    }
    .map_err(std::io::Error::from)?;

    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
