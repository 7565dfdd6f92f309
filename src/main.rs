//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `webwitness` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use webwitness::initialization::init_logger_with;
use webwitness::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            println!(
                "Scanned {} target{} ({} succeeded, {} failed) in {:.1}s",
                report.total_targets,
                if report.total_targets == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            if let Some(index) = &report.index_path {
                println!("Dashboard: {}", index.display());
            }
            println!("Artifacts in {}", report.output_dir.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("webwitness error: {:#}", e);
            process::exit(1);
        }
    }
}
