//! Headless Chromium page backend

use super::{PageAccess, RawPage};
use crate::browser::{BrowserConfig, BrowserSession, PageNavigator};
use crate::error::{Error, NavigationError, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{instrument, warn};

/// Open, snapshot and close steps of a tab-per-fetch backend
#[async_trait]
pub(crate) trait TabLifecycle: Send + Sync {
    type Tab: Send + Sync;

    async fn open_tab(&self) -> Result<Self::Tab>;

    async fn snapshot(&self, tab: &Self::Tab, url: &str) -> Result<RawPage>;

    async fn close_tab(&self, tab: Self::Tab) -> Result<()>;
}

/// Snapshot `url` in a fresh tab. The deadline covers only the snapshot, so
/// the tab is closed on every path, timeouts included.
pub(crate) async fn fetch_in_tab<T: TabLifecycle>(
    tabs: &T,
    url: &str,
    timeout_ms: u64,
) -> Result<RawPage> {
    // Tab creation is bounded by the CDP request timeout.
    let tab = tabs.open_tab().await?;

    let deadline = Duration::from_millis(timeout_ms);
    let result = tokio::time::timeout(deadline, tabs.snapshot(&tab, url))
        .await
        .unwrap_or_else(|_| Err(Error::from(NavigationError::Timeout(timeout_ms))));

    if let Err(e) = tabs.close_tab(tab).await {
        warn!("Failed to close tab for {}: {}", url, e);
    }
    result
}

/// Page backend that renders each page in a shared browser session
pub struct BrowserPageAccess {
    session: BrowserSession,
    page_timeout_ms: u64,
}

impl BrowserPageAccess {
    /// Launch a browser for this backend
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        Ok(Self {
            session: BrowserSession::launch(&config).await?,
            page_timeout_ms: config.page_timeout_ms,
        })
    }

    /// Shut the browser down
    pub async fn close(self) -> Result<()> {
        self.session.close().await
    }
}

#[async_trait]
impl TabLifecycle for BrowserPageAccess {
    type Tab = Page;

    async fn open_tab(&self) -> Result<Page> {
        self.session.open_tab().await
    }

    async fn snapshot(&self, tab: &Page, url: &str) -> Result<RawPage> {
        let final_url = PageNavigator::goto(tab, url).await?;
        let html = PageNavigator::content(tab).await?;
        Ok(RawPage::new(final_url, html))
    }

    async fn close_tab(&self, tab: Page) -> Result<()> {
        self.session.close_tab(tab).await
    }
}

#[async_trait]
impl PageAccess for BrowserPageAccess {
    fn name(&self) -> &str {
        "browser"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<RawPage> {
        fetch_in_tab(self, url, self.page_timeout_ms).await
    }

    #[instrument(skip(self))]
    async fn fetch_within(&self, url: &str, timeout_ms: u64) -> Result<RawPage> {
        fetch_in_tab(self, url, timeout_ms).await
    }
}
