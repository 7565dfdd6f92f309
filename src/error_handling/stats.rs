//! Scan statistics tracking.
//!
//! Thread-safe error counters shared by all scan tasks in a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe error-category counters.
///
/// All categories are initialized to zero on creation, so incrementing never
/// allocates and the struct can be shared across tasks behind an `Arc`.
pub struct ScanStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ScanStats {
    /// Creates a tracker with every category at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ScanStats { errors }
    }

    /// Increments the counter for an error category.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current count for an error category.
    pub fn count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total errors across all categories.
    pub fn total(&self) -> usize {
        ErrorType::iter().map(|e| self.count(e)).sum()
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs non-zero error counters at the end of a run.
pub fn log_error_statistics(stats: &ScanStats) {
    let total = stats.total();
    if total == 0 {
        log::info!("no errors recorded during this run");
        return;
    }
    log::info!("{} error(s) recorded during this run:", total);
    for error_type in ErrorType::iter() {
        let count = stats.count(error_type);
        if count > 0 {
            log::info!("  {}: {}", error_type, count);
        }
    }
}
