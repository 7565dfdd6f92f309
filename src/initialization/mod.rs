//! Shared resource initialization.
//!
//! Builds the resources every scan task shares: the logger, the raw HTTP
//! client, and the semaphore bounding concurrent capture sessions.

mod logger;

pub use logger::init_logger_with;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::{Config, HEADER_FETCH_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Creates the semaphore bounding concurrent capture sessions.
///
/// A limit of zero would deadlock the dispatch loop, so it is clamped to one.
pub fn init_semaphore(limit: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(limit.max(1)))
}

/// Builds the HTTP client used for raw header fetches.
///
/// Invalid certificates are accepted: header capture must work against the
/// same self-signed appliances the rendering engine tolerates.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(Duration::from_secs(HEADER_FETCH_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_clamps_zero() {
        let semaphore = init_semaphore(0);
        assert_eq!(semaphore.available_permits(), 1);
    }

    #[test]
    fn test_init_semaphore_respects_limit() {
        let semaphore = init_semaphore(8);
        assert_eq!(semaphore.available_permits(), 8);
    }

    #[test]
    fn test_init_client() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }
}
