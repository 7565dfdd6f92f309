//! Browser-driven capture session.
//!
//! Each target gets its own headless Chromium instance, so a wedged or
//! crashed renderer cannot take sibling scans down with it. The session owns
//! the browser process, its CDP event-handler task, and one page; `close()`
//! releases each of them best-effort and may be called more than once.

mod headers;
mod metadata;

pub use headers::{extract_security_headers, fetch_headers};
pub use metadata::extract_metadata;

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::{Config, RENDER_SETTLE_DELAY, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error_handling::ScanError;

/// Settings for one capture session.
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// Ceiling on the whole navigation (load plus settle).
    pub navigation_timeout: Duration,
    /// User-Agent presented by the browser context.
    pub user_agent: String,
}

impl CaptureSettings {
    /// Builds capture settings from the scan configuration.
    pub fn from_config(config: &Config) -> Self {
        CaptureSettings {
            navigation_timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// One isolated browser session bound to a single target.
pub struct CaptureSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    closed: bool,
}

impl CaptureSession {
    /// Opens a session and navigates to `url`.
    ///
    /// Fails with [`ScanError::Navigation`] when the load produced no
    /// response document at all and with [`ScanError::NavigationTimeout`]
    /// when the bounded navigation window elapses. A response status of 400
    /// or above is logged as a warning and the scan continues. The session
    /// is fully released on every failure path out of this function.
    pub async fn open(url: &str, settings: &CaptureSettings) -> Result<Self, ScanError> {
        let mut session = Self::launch(settings).await?;

        match tokio::time::timeout(settings.navigation_timeout, session.navigate(url)).await {
            Ok(Ok(())) => Ok(session),
            Ok(Err(e)) => {
                session.close().await;
                Err(e)
            }
            Err(_) => {
                session.close().await;
                Err(ScanError::NavigationTimeout {
                    url: url.to_string(),
                    seconds: settings.navigation_timeout.as_secs(),
                })
            }
        }
    }

    async fn launch(settings: &CaptureSettings) -> Result<Self, ScanError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--ignore-certificate-errors")
            .arg(format!("--user-agent={}", settings.user_agent))
            .build()
            .map_err(ScanError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScanError::Browser(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let mut browser = browser;
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(ScanError::Browser(e.to_string()));
            }
        };

        Ok(CaptureSession {
            browser,
            page,
            handler_task,
            closed: false,
        })
    }

    async fn navigate(&self, url: &str) -> Result<(), ScanError> {
        log::info!("navigating to {}", url);

        self.page
            .goto(url)
            .await
            .map_err(|e| ScanError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let exchange =
            self.page
                .wait_for_navigation_response()
                .await
                .map_err(|e| ScanError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = exchange
            .as_deref()
            .and_then(|request| request.response.as_ref())
            .map(|response| response.status);
        match status {
            Some(code) if code >= 400 => log::warn!("bad HTTP status {} for {}", code, url),
            Some(_) => {}
            None => {
                return Err(ScanError::Navigation {
                    url: url.to_string(),
                    reason: "no response received".to_string(),
                })
            }
        }

        // let client-side rendering settle before extraction
        tokio::time::sleep(RENDER_SETTLE_DELAY).await;
        Ok(())
    }

    /// Rendered document HTML after script execution.
    pub async fn content(&self) -> Result<String, ScanError> {
        self.page
            .content()
            .await
            .map_err(|e| ScanError::Browser(e.to_string()))
    }

    /// Writes a full-page PNG to `path`, creating parent directories as
    /// needed.
    pub async fn capture_screenshot(&self, path: &Path) -> Result<(), ScanError> {
        log::info!("taking screenshot, saving to {}", path.display());
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let params = ScreenshotParams::builder()
            .full_page(true)
            .format(CaptureScreenshotFormat::Png)
            .build();
        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| ScanError::Capture(e.to_string()))?;
        Ok(())
    }

    /// Releases the browser process and its handler task.
    ///
    /// Safe to call repeatedly and after partial failures: each resource is
    /// released independently, and failures are logged rather than raised.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.browser.close().await {
            log::debug!("browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}
