//! Scraper configuration
//!
//! Defaults target the Titan Reach wiki. Values can come from a JSON file,
//! the builder, or CLI flags layered on top.

use crate::browser::BrowserConfig;
use crate::browser::UrlValidator;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Table layout of a skill page, besides its Tools table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    /// Level / resource / xp rows under "Resources"
    Gathering,
    /// Level / fish / xp / tool / bait rows under "Fish"
    Fishing,
}

impl SkillKind {
    /// Section anchor of the skill-specific table
    pub fn section(&self) -> &'static str {
        match self {
            SkillKind::Gathering => "Resources",
            SkillKind::Fishing => "Fish",
        }
    }
}

/// Which Page Access backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBackend {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Headless Chromium
    Browser,
}

/// Configuration for a scrape session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Skills index page
    pub site_url: String,
    /// Path segment preceding page names
    pub path_delimiter: String,
    /// Selector for the index page's skill area links
    pub registry_selector: String,
    /// Anchor of the Tools section
    pub tools_section: String,
    /// Class marking data tables
    pub table_class: String,
    /// Skills to scrape and their table layout
    pub skills: BTreeMap<String, SkillKind>,
    /// Timeout around each page fetch
    pub navigation_timeout_ms: u64,
    /// Page Access backend
    pub backend: PageBackend,
    /// HTTP user agent (None = crate default)
    pub user_agent: Option<String>,
    /// Path to Chrome/Chromium executable
    pub chrome_path: Option<String>,
    /// Run Chromium without a window
    pub headless: bool,
    /// Keep Chromium's sandbox on
    pub sandbox: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let skills = [
            ("Mining".to_string(), SkillKind::Gathering),
            ("Fishing".to_string(), SkillKind::Fishing),
        ]
        .into_iter()
        .collect();

        Self {
            site_url: "https://titanreach.wiki/w/Skills".to_string(),
            path_delimiter: "/w/".to_string(),
            registry_selector: "#skillslayoutlarge area".to_string(),
            tools_section: "Tools".to_string(),
            table_class: "wikitable".to_string(),
            skills,
            navigation_timeout_ms: 30000,
            backend: PageBackend::Http,
            user_agent: None,
            chrome_path: None,
            headless: true,
            sandbox: true,
        }
    }
}

impl ScraperConfig {
    /// Create a new config builder
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_failed = |reason: String| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| load_failed(e.to_string()))?;
        Ok(config)
    }

    /// Layout configured for a skill
    pub fn kind_of(&self, skill: &str) -> Option<SkillKind> {
        self.skills.get(skill).copied()
    }

    /// Browser settings derived from this config
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            sandbox: self.sandbox,
            chrome_path: self.chrome_path.clone(),
            page_timeout_ms: self.navigation_timeout_ms,
        }
    }

    /// Reject values the scraper cannot work with
    pub fn validate(&self) -> Result<()> {
        UrlValidator::validate(&self.site_url).map_err(|reason| ConfigError::InvalidValue {
            field: "site_url",
            reason,
        })?;

        let non_empty = [
            ("path_delimiter", &self.path_delimiter),
            ("registry_selector", &self.registry_selector),
            ("tools_section", &self.tools_section),
            ("table_class", &self.table_class),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if self.navigation_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "navigation_timeout_ms",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Builder for ScraperConfig
#[derive(Default)]
pub struct ScraperConfigBuilder {
    config: ScraperConfig,
}

impl ScraperConfigBuilder {
    /// Set the skills index URL
    pub fn site_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.site_url = url.into();
        self
    }

    /// Set the path delimiter
    pub fn path_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.config.path_delimiter = delimiter.into();
        self
    }

    /// Set the registry area selector
    pub fn registry_selector<S: Into<String>>(mut self, selector: S) -> Self {
        self.config.registry_selector = selector.into();
        self
    }

    /// Set the data table class
    pub fn table_class<S: Into<String>>(mut self, class: S) -> Self {
        self.config.table_class = class.into();
        self
    }

    /// Add or replace a skill's layout
    pub fn skill<S: Into<String>>(mut self, name: S, kind: SkillKind) -> Self {
        self.config.skills.insert(name.into(), kind);
        self
    }

    /// Drop all configured skills
    pub fn clear_skills(mut self) -> Self {
        self.config.skills.clear();
        self
    }

    /// Set the navigation timeout
    pub fn navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.config.navigation_timeout_ms = ms;
        self
    }

    /// Set the Page Access backend
    pub fn backend(mut self, backend: PageBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the HTTP user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Show the browser window
    pub fn headed(mut self) -> Self {
        self.config.headless = false;
        self
    }

    /// Disable Chromium's sandbox
    pub fn no_sandbox(mut self) -> Self {
        self.config.sandbox = false;
        self
    }

    /// Build the config
    pub fn build(self) -> ScraperConfig {
        self.config
    }
}
