//! Configuration constants.
//!
//! This module defines timeouts, limits, and default values used throughout
//! the application.

use std::time::Duration;

/// Default maximum number of concurrently open capture sessions.
///
/// Each in-flight target owns an entire headless browser process, so this is
/// deliberately far lower than a plain HTTP scanner would use. Raise it only
/// if the host has the memory and file descriptors to match.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default navigation timeout ceiling per target, in seconds.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Delay after the navigation response before the page is treated as settled.
/// Gives client-side rendering a chance to finish before content extraction.
pub const RENDER_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Timeout for the raw header re-fetch, in seconds.
pub const HEADER_FETCH_TIMEOUT_SECS: u64 = 10;

/// Browser window size for rendering and screenshots.
pub const WINDOW_WIDTH: u32 = 1440;
/// Browser window height, see [`WINDOW_WIDTH`].
pub const WINDOW_HEIGHT: u32 = 900;

/// Default User-Agent string for the browser context and raw requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

/// Maximum error message length in characters.
/// Error messages longer than this are truncated with a note about the
/// original length before being stored on a result.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// File name of the per-target screenshot artifact.
pub const SCREENSHOT_FILENAME: &str = "screenshot.png";
/// File name of the per-target JSON sidecar.
pub const SIDECAR_FILENAME: &str = "data.json";

/// Default signature rule file location.
pub const DEFAULT_SIGNATURES_PATH: &str = "data/signatures.txt";
/// Default category rule file location.
pub const DEFAULT_CATEGORIES_PATH: &str = "data/categories.txt";
