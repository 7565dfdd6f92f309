//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
///
/// These are the only batch-fatal errors besides an uncreatable output
/// directory: everything raised inside a target's scan stays on that target.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised inside a single target's scan.
///
/// None of these cross the per-target boundary: the scanner folds them into
/// the result's `error` field so one failing target cannot drop the batch.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Navigation produced no response document at all.
    #[error("navigation to {url} failed: {reason}")]
    Navigation {
        /// Target URL
        url: String,
        /// What went wrong
        reason: String,
    },

    /// Navigation did not complete within the configured ceiling.
    #[error("navigation to {url} timed out after {seconds}s")]
    NavigationTimeout {
        /// Target URL
        url: String,
        /// The elapsed ceiling in seconds
        seconds: u64,
    },

    /// Browser-level failure: launch, page creation, or content extraction.
    #[error("browser error: {0}")]
    Browser(String),

    /// The raw header re-fetch failed.
    #[error("header fetch failed: {0}")]
    HeaderFetch(#[from] ReqwestError),

    /// Screenshot capture failed.
    #[error("screenshot capture failed: {0}")]
    Capture(String),

    /// Sidecar serialization failed.
    #[error("result serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure (target directory, screenshot, sidecar).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error categories tallied across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// No response received during navigation
    Navigation,
    /// Navigation timeout ceiling elapsed
    NavigationTimeout,
    /// Browser launch/page/content failure
    Browser,
    /// Raw header fetch failure
    HeaderFetch,
    /// Screenshot capture failure
    Capture,
    /// Filesystem or serialization failure
    Io,
    /// A scan task panicked before producing a result
    TaskPanic,
}

impl ScanError {
    /// The statistics bucket this error counts toward.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ScanError::Navigation { .. } => ErrorType::Navigation,
            ScanError::NavigationTimeout { .. } => ErrorType::NavigationTimeout,
            ScanError::Browser(_) => ErrorType::Browser,
            ScanError::HeaderFetch(_) => ErrorType::HeaderFetch,
            ScanError::Capture(_) => ErrorType::Capture,
            ScanError::Serialization(_) | ScanError::Io(_) => ErrorType::Io,
        }
    }
}

impl ErrorType {
    /// Human-readable label used in end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Navigation => "Navigation failure",
            ErrorType::NavigationTimeout => "Navigation timeout",
            ErrorType::Browser => "Browser error",
            ErrorType::HeaderFetch => "Header fetch error",
            ErrorType::Capture => "Screenshot capture error",
            ErrorType::Io => "I/O error",
            ErrorType::TaskPanic => "Scan task panic",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
