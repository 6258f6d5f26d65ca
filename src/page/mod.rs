//! Page Access layer
//!
//! The extraction core never talks to a browser or the network directly. It
//! asks a [`PageAccess`] backend for a [`RawPage`], parses it into a
//! [`Document`] and reads cells from that snapshot.

pub mod browser;
pub mod document;
pub mod fixture;
pub mod http;

pub use browser::BrowserPageAccess;
pub use document::{Document, RawPage};
pub use fixture::StaticPageAccess;
pub use http::HttpPageAccess;

use crate::error::{NavigationError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Navigate to a URL and capture the resulting document.
///
/// Implementations surface failures unchanged; the extraction core does not
/// retry.
#[async_trait]
pub trait PageAccess: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Fetch the page at `url`
    async fn fetch(&self, url: &str) -> Result<RawPage>;

    /// Fetch the page at `url`, giving up after `timeout_ms`.
    ///
    /// Backends holding resources per fetch override this so that the
    /// deadline never interrupts their cleanup.
    async fn fetch_within(&self, url: &str, timeout_ms: u64) -> Result<RawPage> {
        tokio::time::timeout(Duration::from_millis(timeout_ms), self.fetch(url))
            .await
            .map_err(|_| NavigationError::Timeout(timeout_ms))?
    }
}

#[async_trait]
impl<P: PageAccess + ?Sized> PageAccess for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, url: &str) -> Result<RawPage> {
        (**self).fetch(url).await
    }

    async fn fetch_within(&self, url: &str, timeout_ms: u64) -> Result<RawPage> {
        (**self).fetch_within(url, timeout_ms).await
    }
}
