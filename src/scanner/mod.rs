//! Per-target scan execution.
//!
//! [`scan_target`] is the failure boundary of the pipeline: whatever goes
//! wrong inside one target's capture is folded into that target's result,
//! and the function itself never fails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capture::{
    extract_metadata, extract_security_headers, fetch_headers, CaptureSession, CaptureSettings,
};
use crate::config::{SCREENSHOT_FILENAME, SIDECAR_FILENAME};
use crate::error_handling::{ErrorType, ScanError, ScanStats};
use crate::fingerprint;
use crate::models::ScanResult;
use crate::rules::RuleSet;
use crate::utils::{sanitize_and_truncate_error_message, url_safe_name};

/// Shared, read-only state handed to every scan task.
pub struct ScanContext {
    /// Client for the raw header re-fetch.
    pub client: Arc<reqwest::Client>,
    /// Loaded rule lists, immutable for the batch.
    pub rules: Arc<RuleSet>,
    /// Per-session capture settings.
    pub capture: CaptureSettings,
    /// Batch output directory; each target gets a subdirectory.
    pub output_dir: PathBuf,
    /// Run-wide error counters.
    pub stats: Arc<ScanStats>,
}

/// Scans one target, never failing: errors are recorded on the result and
/// whatever was gathered before the failure is retained.
pub async fn scan_target(url: &str, ctx: &ScanContext) -> ScanResult {
    let mut result = ScanResult::new(url);
    let target_dir = ctx.output_dir.join(url_safe_name(url));

    if let Err(e) = tokio::fs::create_dir_all(&target_dir).await {
        log::error!("failed to create target directory for {}: {}", url, e);
        ctx.stats.increment(ErrorType::Io);
        result.error = Some(sanitize_and_truncate_error_message(&e.to_string()));
        return result;
    }

    if let Err(e) = capture_target(&mut result, &target_dir, ctx).await {
        log::error!("error processing {}: {}", url, e);
        ctx.stats.increment(e.error_type());
        result.error = Some(sanitize_and_truncate_error_message(&e.to_string()));
    }

    // The sidecar is written for successes and failures alike, so the
    // on-disk record always matches what the batch reports.
    if let Err(e) = write_sidecar(&result, &target_dir).await {
        log::warn!("failed to write sidecar for {}: {}", url, e);
        ctx.stats.increment(ErrorType::Io);
        if result.error.is_none() {
            result.error = Some(sanitize_and_truncate_error_message(&e.to_string()));
        }
    }

    result
}

/// Opens the session, runs the capture stages, and closes the session on
/// both the success and the failure path.
async fn capture_target(
    result: &mut ScanResult,
    target_dir: &Path,
    ctx: &ScanContext,
) -> Result<(), ScanError> {
    let mut session = CaptureSession::open(&result.url, &ctx.capture).await?;
    let outcome = capture_stages(result, target_dir, &session, ctx).await;
    session.close().await;
    outcome
}

/// The ordered capture sequence. Populates `result` as stages complete, so
/// a mid-sequence failure keeps everything gathered before it.
async fn capture_stages(
    result: &mut ScanResult,
    target_dir: &Path,
    session: &CaptureSession,
    ctx: &ScanContext,
) -> Result<(), ScanError> {
    let headers = fetch_headers(&ctx.client, &result.url).await?;
    result.security_headers = extract_security_headers(&headers);
    result.http_headers = headers;

    let content = session.content().await?;
    result.metadata = extract_metadata(&content);

    let fingerprint = fingerprint::evaluate(&content, &result.metadata.title, &ctx.rules);
    log::info!(
        "identified {} application(s) for {}, category: {}",
        fingerprint.identified_applications.len(),
        result.url,
        fingerprint.category.as_deref().unwrap_or("none")
    );
    result.identified_applications = fingerprint.identified_applications;
    result.default_credentials = fingerprint.default_credentials;
    result.category = fingerprint.category;

    let screenshot_path = target_dir.join(SCREENSHOT_FILENAME);
    session.capture_screenshot(&screenshot_path).await?;
    result.screenshot_path = Some(screenshot_path.to_string_lossy().into_owned());

    Ok(())
}

/// Writes the JSON sidecar record next to the screenshot.
pub async fn write_sidecar(result: &ScanResult, target_dir: &Path) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(target_dir.join(SIDECAR_FILENAME), json).await?;
    Ok(())
}

/// Reads a sidecar record back into a result.
pub async fn read_sidecar(target_dir: &Path) -> Result<ScanResult, ScanError> {
    let json = tokio::fs::read_to_string(target_dir.join(SIDECAR_FILENAME)).await?;
    Ok(serde_json::from_str(&json)?)
}
