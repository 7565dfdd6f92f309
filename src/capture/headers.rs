//! Raw response header capture.

use std::collections::BTreeMap;

use reqwest::Client;

use crate::config::{HEADER_NOT_SET, SECURITY_HEADERS};
use crate::error_handling::ScanError;

/// Re-issues a plain GET against the target and returns its response headers.
///
/// This runs independently of the rendered navigation so the headers reflect
/// a fresh exchange with the server rather than whatever the browser cached
/// or followed through redirects.
pub async fn fetch_headers(
    client: &Client,
    url: &str,
) -> Result<BTreeMap<String, String>, ScanError> {
    let response = client.get(url).send().await?;

    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
        headers.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    log::debug!("fetched {} response headers for {}", headers.len(), url);
    Ok(headers)
}

/// Projects the fixed set of tracked security headers out of a raw header
/// map.
///
/// Lookup is case-insensitive. Every tracked name is present in the output:
/// headers the server did not send map to the "Not set" sentinel, never to
/// an absent key.
pub fn extract_security_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut tracked = BTreeMap::new();
    for name in SECURITY_HEADERS {
        let value = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| HEADER_NOT_SET.to_string());
        tracked.insert((*name).to_string(), value);
    }
    tracked
}
