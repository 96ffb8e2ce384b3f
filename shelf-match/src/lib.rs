//! shelf-match library - product listing grouper
//!
//! Loads listings from a JSON file, groups the ones describing the same
//! product and writes the groups as a JSON report.

use shelf_common::{group, GroupingSummary, Result};
use std::io::Write;
use tracing::info;

pub mod loader;
pub mod reporter;
pub mod settings;

pub use reporter::OutputFormat;
pub use settings::{Settings, SettingsOverrides};

/// Load, group and report one record file
///
/// Nothing is written to `writer` if loading fails.
pub async fn run<W: Write>(settings: &Settings, writer: W) -> Result<GroupingSummary> {
    let records = loader::load_records(&settings.input).await?;

    let groups = group(&records);
    let summary = GroupingSummary::from_groups(&groups);
    info!(
        records = summary.records,
        groups = summary.groups,
        matched = summary.matched,
        "Grouped records"
    );

    reporter::write_report(writer, &groups, settings.format)?;
    Ok(summary)
}
