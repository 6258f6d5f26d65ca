//! In-memory pages
//!
//! Serves fixed HTML by URL. Used for offline runs against saved pages and
//! throughout the test suite.

use super::{PageAccess, RawPage};
use crate::error::{NavigationError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Page backend over a URL -> HTML map
#[derive(Debug, Clone, Default)]
pub struct StaticPageAccess {
    pages: HashMap<String, String>,
}

impl StaticPageAccess {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`
    pub fn with_page<U: Into<String>, H: Into<String>>(mut self, url: U, html: H) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serve the contents of a saved HTML file at `url`
    pub fn with_file<U: Into<String>>(self, url: U, path: impl AsRef<Path>) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(self.with_page(url, html))
    }

    /// Number of pages served
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are served
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl PageAccess for StaticPageAccess {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, url: &str) -> Result<RawPage> {
        debug!("Serving static page: {}", url);
        self.pages
            .get(url)
            .map(|html| RawPage::new(url, html.clone()))
            .ok_or_else(|| NavigationError::LoadFailed(format!("no page stored for {}", url)).into())
    }
}
