//! Browser session
//!
//! One Chromium process per scrape run. Every page fetch opens its own tab
//! and closes it again; [`BrowserSession::open_tabs`] counts the tabs that
//! are currently open.

use crate::error::{BrowserError, Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Chromium launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run without a window (default: true)
    pub headless: bool,
    /// Keep Chrome's sandbox on (default: true)
    pub sandbox: bool,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Deadline for one page fetch, tab creation through snapshot
    pub page_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chrome_path: None,
            page_timeout_ms: 30000,
        }
    }
}

/// A running browser plus the task pumping its CDP events
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    open_tabs: AtomicUsize,
}

impl BrowserSession {
    /// Launch Chromium
    #[instrument(skip(config), fields(headless = config.headless))]
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = CdpBrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.arg("--no-sandbox");
        }
        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(BrowserError::ConfigError)?;
        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        info!("Browser launched");
        Ok(Self {
            browser,
            handler,
            open_tabs: AtomicUsize::new(0),
        })
    }

    /// Open a blank tab
    pub async fn open_tab(&self) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;
        self.open_tabs.fetch_add(1, Ordering::SeqCst);
        Ok(page)
    }

    /// Close a tab opened by [`open_tab`](Self::open_tab)
    pub async fn close_tab(&self, page: Page) -> Result<()> {
        self.open_tabs.fetch_sub(1, Ordering::SeqCst);
        page.close().await.map_err(|e| Error::cdp(e.to_string()))?;
        Ok(())
    }

    /// Tabs opened and not yet closed
    pub fn open_tabs(&self) -> usize {
        self.open_tabs.load(Ordering::SeqCst)
    }

    /// Shut the browser down
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        let leaked = self.open_tabs();
        if leaked > 0 {
            warn!("Closing browser with {} tabs still open", leaked);
        }

        self.browser
            .close()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handler).await;

        info!("Browser closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_default() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chrome_path.is_none());
        assert_eq!(config.page_timeout_ms, 30000);
    }
}
