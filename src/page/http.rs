//! Plain HTTP page backend
//!
//! Wiki pages are server-rendered, so a GET returns the same tables a browser
//! would show. This backend needs no Chromium install.

use super::{PageAccess, RawPage};
use crate::browser::navigation::UrlValidator;
use crate::error::{NavigationError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("skill-scrape/", env!("CARGO_PKG_VERSION"));

/// Page backend over `reqwest`
pub struct HttpPageAccess {
    client: reqwest::Client,
}

impl HttpPageAccess {
    /// Create a backend with a request timeout and optional user agent
    pub fn new(timeout_ms: u64, user_agent: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(NavigationError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageAccess for HttpPageAccess {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<RawPage> {
        UrlValidator::validate(url).map_err(NavigationError::InvalidUrl)?;
        info!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(NavigationError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            }
            .into());
        }

        let final_url = response.url().to_string();
        let html = response.text().await.map_err(NavigationError::from)?;
        debug!("Fetched {} bytes from {}", html.len(), final_url);

        Ok(RawPage::new(final_url, html))
    }
}
