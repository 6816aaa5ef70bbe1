//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `index_notify` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::process;

use index_notify::initialization::init_logger_with;
use index_notify::{Config, IndexingService, LogFormat, LogLevel};

/// Notify search-engine indexing providers about changed URLs.
///
/// Provider credentials come from the environment (or a .env file):
/// INDEX_NOTIFY_HOST, INDEXNOW_KEY, GOOGLE_SERVICE_ACCOUNT_EMAIL,
/// GOOGLE_SERVICE_ACCOUNT_KEY. A provider without credentials is skipped.
#[derive(Debug, Parser)]
#[command(name = "index_notify", version)]
struct Cli {
    /// URLs or rooted paths to submit; reads one per line from stdin if empty
    urls: Vec<String>,

    /// Site host override (defaults to INDEX_NOTIFY_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Print the full report as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let mut config = match (&cli.host, Config::from_env()) {
        (_, Ok(config)) => config,
        (Some(host), Err(_)) => Config::new(host.clone()),
        (None, Err(e)) => return Err(e),
    };
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }

    let urls = if cli.urls.is_empty() {
        read_urls_from_stdin()?
    } else {
        cli.urls.clone()
    };

    let service = IndexingService::new(config)?;
    match service.submit(&urls).await {
        Ok(report) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report)
                        .context("Failed to serialize report")?
                );
            } else {
                println!(
                    "{} {}/{} submission(s) accepted, {} failed, {} provider(s) skipped",
                    if report.overall_success { "✅" } else { "❌" },
                    report.summary.succeeded,
                    report.summary.attempted,
                    report.summary.failed,
                    report.summary.providers_skipped,
                );
            }
            if report.overall_success {
                Ok(())
            } else {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("index_notify error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Reads one URL per line from stdin, skipping blanks and `#` comments.
fn read_urls_from_stdin() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut urls = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read line from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}
