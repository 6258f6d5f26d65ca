//! Page navigation
//!
//! Drives one tab to a URL and reads back its HTML. Deadlines are applied by
//! the caller around the whole fetch; nothing here retries.

use crate::error::{BrowserError, Error, NavigationError, Result};
use chromiumoxide::Page;
use tracing::{debug, instrument};

/// Resolves once the document has fired its `load` event
const WAIT_FOR_LOAD: &str = r#"
    new Promise(resolve => {
        if (document.readyState === 'complete') {
            resolve(true);
        } else {
            window.addEventListener('load', () => resolve(true));
        }
    })
"#;

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Validate a URL for navigation
    pub fn validate(url: &str) -> std::result::Result<(), String> {
        if url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        if !url.starts_with("http://")
            && !url.starts_with("https://")
            && !url.starts_with("file://")
        {
            return Err(format!(
                "URL must start with http://, https://, or file://: {}",
                url
            ));
        }

        if url.len() > 2048 {
            return Err("URL exceeds maximum length of 2048 characters".to_string());
        }

        Ok(())
    }
}

/// Page navigator
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate to `url`, wait for `load` and return the final URL
    #[instrument(skip(page))]
    pub async fn goto(page: &Page, url: &str) -> Result<String> {
        UrlValidator::validate(url).map_err(NavigationError::InvalidUrl)?;

        page.goto(url)
            .await
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;
        page.evaluate(WAIT_FOR_LOAD)
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;

        let final_url = page
            .url()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?
            .unwrap_or_else(|| url.to_string());
        debug!("Loaded {} -> {}", url, final_url);
        Ok(final_url)
    }

    /// Serialized HTML of the current document
    pub async fn content(page: &Page) -> Result<String> {
        page.content()
            .await
            .map_err(|e| BrowserError::ContentFailed(e.to_string()).into())
    }
}
