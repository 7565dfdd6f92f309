//! Core result types shared across the scan pipeline.
//!
//! A [`ScanResult`] is produced exactly once per target and is read-only once
//! the scanner hands it to the orchestrator. Partial failures still yield a
//! result with the error recorded, so one failing target can never drop the
//! batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{HEADER_NOT_SET, SECURITY_HEADERS};

/// Title and meta tags extracted from the rendered document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Document title; empty when the page has none.
    pub title: String,
    /// Meta tag name (or property) mapped to its content attribute.
    pub meta_tags: BTreeMap<String, String>,
}

/// One application identified by a matching signature rule.
///
/// The list of these on a result follows rule-file order and is not
/// deduplicated: two rules naming the same application produce two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedApplication {
    /// Application name, from the rule's `(Name)` prefix or first pattern.
    pub name: String,
    /// The patterns that all matched the page content.
    pub matched_patterns: Vec<String>,
    /// Free-text credential/description string from the rule.
    pub credentials: String,
}

/// Per-target scan outcome, written verbatim to the JSON sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The target URL exactly as supplied.
    pub url: String,
    /// RFC 3339 timestamp taken when the scan started.
    pub timestamp: String,
    /// Raw response headers from the independent header fetch.
    pub http_headers: BTreeMap<String, String>,
    /// The eight tracked security headers. Every key is always present;
    /// headers the server did not send carry the "Not set" sentinel.
    pub security_headers: BTreeMap<String, String>,
    /// Rendered-document title and meta tags.
    pub metadata: PageMetadata,
    /// Signature matches in rule-file order, duplicates allowed.
    pub identified_applications: Vec<IdentifiedApplication>,
    /// Distinct credential strings, insertion-order deduplicated.
    pub default_credentials: Vec<String>,
    /// Category label from the first matching category rule or the title
    /// fallback heuristics; absent when neither applied.
    pub category: Option<String>,
    /// Path of the captured screenshot, when capture succeeded.
    pub screenshot_path: Option<String>,
    /// Failure description; the other fields keep whatever was gathered
    /// before the failure.
    pub error: Option<String>,
}

impl ScanResult {
    /// Creates an empty result for a target, stamped with the current time.
    ///
    /// The security-header map starts out fully populated with the "Not set"
    /// sentinel so the eight tracked keys are present on every result, even
    /// one that fails before headers are fetched.
    pub fn new(url: &str) -> Self {
        let mut security_headers = BTreeMap::new();
        for header in SECURITY_HEADERS {
            security_headers.insert((*header).to_string(), HEADER_NOT_SET.to_string());
        }
        ScanResult {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            security_headers,
            ..Default::default()
        }
    }

    /// Result for a target whose task never produced one (e.g. a panic).
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        let mut result = Self::new(url);
        result.error = Some(error.into());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_has_all_security_header_keys() {
        let result = ScanResult::new("https://example.com");
        assert_eq!(result.security_headers.len(), SECURITY_HEADERS.len());
        for header in SECURITY_HEADERS {
            assert_eq!(
                result.security_headers.get(*header).map(String::as_str),
                Some(HEADER_NOT_SET)
            );
        }
    }

    #[test]
    fn test_failed_result_keeps_url_and_error() {
        let result = ScanResult::failed("https://example.com", "boom");
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.identified_applications.is_empty());
    }

    #[test]
    fn test_scan_result_json_round_trip() {
        let mut result = ScanResult::new("https://example.com");
        result.http_headers.insert("server".into(), "nginx".into());
        result
            .security_headers
            .insert("X-Frame-Options".into(), "DENY".into());
        result.metadata.title = "Example".into();
        result
            .metadata
            .meta_tags
            .insert("generator".into(), "WordPress 6.4".into());
        result.identified_applications.push(IdentifiedApplication {
            name: "WordPress".into(),
            matched_patterns: vec!["wordpress".into(), "wp-content".into()],
            credentials: "(WordPress) admin/admin".into(),
        });
        result
            .default_credentials
            .push("(WordPress) admin/admin".into());
        result.category = Some("cms".into());
        result.screenshot_path = Some("out/screenshot.png".into());

        let json = serde_json::to_string(&result).expect("serialize");
        let reloaded: ScanResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(result, reloaded);
    }

    #[test]
    fn test_error_result_round_trip() {
        let result = ScanResult::failed("https://down.example", "navigation failed");
        let json = serde_json::to_string(&result).expect("serialize");
        let reloaded: ScanResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(result, reloaded);
    }
}
