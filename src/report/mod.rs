//! Result aggregation and report records.
//!
//! Reduces the batch's per-target results into summary statistics and the
//! per-target rows the dashboard renders from.

mod html;

pub use html::render_reports;

use std::collections::BTreeMap;

use base64::Engine;
use serde::Serialize;

use crate::models::ScanResult;

/// Per-target row of the aggregate report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Target URL.
    pub url: String,
    /// Scan timestamp (RFC 3339).
    pub timestamp: String,
    /// File name of the per-target report page.
    pub report_file: String,
    /// Rendered-document title, empty when unavailable.
    pub title: String,
    /// Assigned category, when one was resolved.
    pub category: Option<String>,
    /// Number of identified-application entries.
    pub apps_count: usize,
    /// Whether any default-credential hints were found.
    pub has_default_creds: bool,
    /// Base64-encoded screenshot bytes; absent when the file is missing or
    /// unreadable.
    pub screenshot_data: Option<String>,
    /// Failure description for failed targets.
    pub error: Option<String>,
}

/// Derived, read-only view over a batch's results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateStats {
    /// Number of targets scanned.
    pub total_urls: usize,
    /// Number of targets that recorded an error.
    pub errors: usize,
    /// Category label mapped to occurrence count. Unresolved categories are
    /// bucketed under "Unknown".
    pub categories: BTreeMap<String, usize>,
    /// Application name mapped to identification count.
    pub apps_identified: BTreeMap<String, usize>,
    /// Number of targets exposing at least one default-credential hint.
    pub default_creds_found: usize,
    /// One row per target, in batch order.
    pub reports: Vec<ReportSummary>,
}

/// Reduces all per-target results into summary statistics and report rows.
///
/// The only I/O is reading screenshot files to embed their bytes; a missing
/// or unreadable screenshot degrades that row's image to `None` without
/// failing the aggregation.
pub fn aggregate(results: &[ScanResult]) -> AggregateStats {
    let mut stats = AggregateStats {
        total_urls: results.len(),
        ..Default::default()
    };

    for (index, result) in results.iter().enumerate() {
        if result.error.is_some() {
            stats.errors += 1;
        }

        let has_default_creds = !result.default_credentials.is_empty();
        if has_default_creds {
            stats.default_creds_found += 1;
        }

        let category_key = result
            .category
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        *stats.categories.entry(category_key).or_insert(0) += 1;

        for app in &result.identified_applications {
            *stats.apps_identified.entry(app.name.clone()).or_insert(0) += 1;
        }

        stats.reports.push(ReportSummary {
            url: result.url.clone(),
            timestamp: result.timestamp.clone(),
            report_file: format!("report_{}.html", index),
            title: result.metadata.title.clone(),
            category: result.category.clone(),
            apps_count: result.identified_applications.len(),
            has_default_creds,
            screenshot_data: result
                .screenshot_path
                .as_deref()
                .and_then(read_screenshot_base64),
            error: result.error.clone(),
        });
    }

    stats
}

fn read_screenshot_base64(path: &str) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        Err(e) => {
            log::warn!("could not read screenshot {}: {}", path, e);
            None
        }
    }
}
