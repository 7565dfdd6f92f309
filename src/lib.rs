//! webwitness library: concurrent web reconnaissance core.
//!
//! For each target URL, webwitness captures a rendered snapshot with a
//! headless browser, extracts HTTP response metadata, and fingerprints the
//! running application against a signature database, then aggregates the
//! per-target outcomes into a single report-ready dataset.
//!
//! # Example
//!
//! ```no_run
//! use webwitness::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     urls: vec!["https://example.com".to_string()],
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!("scanned {} targets ({} failed)", report.total_targets, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime and a Chromium/Chrome binary on the
//! host for page rendering.

#![warn(missing_docs)]

mod capture;
pub mod config;
mod error_handling;
mod fingerprint;
pub mod initialization;
mod models;
mod report;
mod rules;
mod scanner;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, ScanError};
pub use fingerprint::{evaluate, FingerprintResult};
pub use models::{IdentifiedApplication, PageMetadata, ScanResult};
pub use report::{aggregate, render_reports, AggregateStats, ReportSummary};
pub use rules::{load_rules, CategoryRule, RuleSet, SignatureRule};
pub use run::{run_scan, ScanReport};
pub use scanner::{read_sidecar, write_sidecar};

// Internal run module (contains the batch orchestration)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};

    use crate::capture::CaptureSettings;
    use crate::config::Config;
    use crate::error_handling::{log_error_statistics, ErrorType, ScanStats};
    use crate::initialization::{init_client, init_semaphore};
    use crate::models::ScanResult;
    use crate::report;
    use crate::rules::load_rules;
    use crate::scanner::{scan_target, ScanContext};

    /// Summary of a completed batch scan.
    #[derive(Debug, Clone)]
    pub struct ScanReport {
        /// Number of targets scanned (always equal to the number supplied).
        pub total_targets: usize,
        /// Targets that completed without an error.
        pub successful: usize,
        /// Targets whose result carries an error.
        pub failed: usize,
        /// Directory holding this run's artifacts.
        pub output_dir: PathBuf,
        /// Path of the rendered dashboard, unless reporting was disabled.
        pub index_path: Option<PathBuf>,
        /// Elapsed wall-clock time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs a full batch scan with the provided configuration.
    ///
    /// Targets are scanned concurrently (bounded by `max_concurrency`), each
    /// in its own isolated browser session. The returned results always
    /// match the input one-to-one: a failing target yields a result with its
    /// error recorded, never a missing entry.
    ///
    /// # Errors
    ///
    /// Fails only on batch-level problems: no targets supplied, an
    /// unreadable target file, an uncreatable output directory, client
    /// initialization, or report rendering. Per-target failures are folded
    /// into the corresponding result.
    pub async fn run_scan(config: Config) -> Result<ScanReport> {
        let targets = collect_targets(&config).await?;
        if targets.is_empty() {
            anyhow::bail!("no target URLs provided");
        }

        let rules = Arc::new(load_rules(&config.signatures, &config.categories));
        let client = init_client(&config).context("Failed to initialize HTTP client")?;

        let output_dir = config
            .output
            .join(Utc::now().format("%Y%m%d_%H%M%S").to_string());
        tokio::fs::create_dir_all(&output_dir)
            .await
            .context("Failed to create output directory")?;

        let stats = Arc::new(ScanStats::new());
        let ctx = Arc::new(ScanContext {
            client,
            rules,
            capture: CaptureSettings::from_config(&config),
            output_dir: output_dir.clone(),
            stats: Arc::clone(&stats),
        });

        info!(
            "scanning {} target(s) into {}",
            targets.len(),
            output_dir.display()
        );
        let start = std::time::Instant::now();

        let semaphore = init_semaphore(config.max_concurrency);
        let mut tasks = FuturesUnordered::new();
        for (index, url) in targets.iter().enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .context("Semaphore closed while dispatching targets")?;
            let ctx = Arc::clone(&ctx);
            let url: Arc<str> = Arc::from(url.as_str());
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                info!("processing: {}", url);
                (index, scan_target(&url, &ctx).await)
            }));
        }

        let mut completed = Vec::with_capacity(targets.len());
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok(indexed) => completed.push(indexed),
                Err(join_error) => {
                    warn!("scan task panicked: {:?}", join_error);
                    stats.increment(ErrorType::TaskPanic);
                }
            }
        }
        let results = assemble_in_order(completed, &targets);

        let aggregate = report::aggregate(&results);
        let index_path = if config.no_report {
            None
        } else {
            Some(
                report::render_reports(&aggregate, &results, &output_dir)
                    .context("Failed to render reports")?,
            )
        };

        log_error_statistics(&stats);

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        Ok(ScanReport {
            total_targets: results.len(),
            successful: results.len() - failed,
            failed,
            output_dir,
            index_path,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }

    /// Places completed results back into input order, synthesizing an
    /// error result for any slot whose task never reported back. The output
    /// always has exactly one result per target, in target order.
    fn assemble_in_order(
        completed: Vec<(usize, ScanResult)>,
        targets: &[String],
    ) -> Vec<ScanResult> {
        let mut slots: Vec<Option<ScanResult>> = targets.iter().map(|_| None).collect();
        for (index, result) in completed {
            if index < slots.len() {
                slots[index] = Some(result);
            }
        }
        slots
            .into_iter()
            .zip(targets)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    ScanResult::failed(url, "scan task panicked before producing a result")
                })
            })
            .collect()
    }

    async fn collect_targets(config: &Config) -> Result<Vec<String>> {
        let mut targets = config.urls.clone();
        if let Some(path) = &config.file {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to open target file {}", path.display()))?;
            targets.extend(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(ToString::to_string),
            );
        }
        Ok(targets)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn urls(names: &[&str]) -> Vec<String> {
            names.iter().map(ToString::to_string).collect()
        }

        #[test]
        fn test_assemble_preserves_input_order_regardless_of_completion_order() {
            let targets = urls(&["https://a.example", "https://b.example", "https://c.example"]);
            let completed = vec![
                (2, ScanResult::new("https://c.example")),
                (0, ScanResult::new("https://a.example")),
                (1, ScanResult::new("https://b.example")),
            ];
            let results = assemble_in_order(completed, &targets);
            assert_eq!(results.len(), targets.len());
            for (result, target) in results.iter().zip(&targets) {
                assert_eq!(&result.url, target);
            }
        }

        #[test]
        fn test_assemble_fills_missing_slots_with_error_results() {
            let targets = urls(&["https://a.example", "https://b.example"]);
            let completed = vec![(0, ScanResult::new("https://a.example"))];
            let results = assemble_in_order(completed, &targets);
            assert_eq!(results.len(), 2);
            assert!(results[0].error.is_none());
            assert!(results[1].error.is_some());
            assert_eq!(results[1].url, "https://b.example");
        }

        #[test]
        fn test_assemble_duplicate_targets_stay_independent() {
            let targets = urls(&["https://dup.example", "https://dup.example"]);
            let completed = vec![
                (0, ScanResult::new("https://dup.example")),
                (1, ScanResult::failed("https://dup.example", "boom")),
            ];
            let results = assemble_in_order(completed, &targets);
            assert!(results[0].error.is_none());
            assert_eq!(results[1].error.as_deref(), Some("boom"));
        }

        #[tokio::test]
        async fn test_collect_targets_merges_cli_and_file() {
            let dir = tempfile::tempdir().expect("tempdir");
            let list = dir.path().join("targets.txt");
            tokio::fs::write(&list, "# comment\nhttps://b.example\n\n  https://c.example  \n")
                .await
                .expect("write");

            let config = Config {
                urls: vec!["https://a.example".to_string()],
                file: Some(list),
                ..Default::default()
            };
            let targets = collect_targets(&config).await.expect("collect");
            assert_eq!(
                targets,
                vec![
                    "https://a.example".to_string(),
                    "https://b.example".to_string(),
                    "https://c.example".to_string(),
                ]
            );
        }

        #[tokio::test]
        async fn test_run_scan_rejects_empty_target_list() {
            let config = Config::default();
            assert!(run_scan(config).await.is_err());
        }
    }
}
