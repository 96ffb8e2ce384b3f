//! shelf-match - Product listing grouper
//!
//! Reads `{title, supermarket}` listings from a JSON file, groups the listings
//! that describe the same product and prints the groups as JSON on stdout.
//! Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shelf_match::reporter::{write_normalization, OutputFormat};
use shelf_match::{Settings, SettingsOverrides};

/// Command-line arguments for shelf-match
#[derive(Parser, Debug)]
#[command(name = "shelf-match")]
#[command(about = "Group product listings that describe the same product")]
#[command(version)]
struct Args {
    /// JSON file with the listings [default: data01.json]
    input: Option<PathBuf>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,

    /// TOML config file [default: <config dir>/shelf/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Show how a single title normalizes and exit
    #[arg(long, value_name = "TITLE", conflicts_with = "input")]
    normalize: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(title) = args.normalize.as_deref() {
        let format = OutputFormat::from_compact(args.compact);
        write_normalization(std::io::stdout().lock(), title, format)
            .context("Failed to write normalization")?;
        return Ok(());
    }

    let settings = Settings::resolve(SettingsOverrides {
        input: args.input,
        compact: args.compact,
        log_level: args.log_level,
        config_file: args.config,
    })
    .context("Failed to resolve settings")?;

    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting shelf-match v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &settings.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    info!(
        "Input: {} (from {})",
        settings.input.display(),
        settings.input_source
    );

    match shelf_match::run(&settings, std::io::stdout().lock()).await {
        Ok(summary) => {
            info!(
                "Done: {} records in {} groups ({} with more than one listing)",
                summary.records, summary.groups, summary.matched
            );
            Ok(())
        }
        Err(e) => {
            error!("Grouping aborted: {}", e);
            Err(e).with_context(|| format!("Failed to group {}", settings.input.display()))
        }
    }
}
