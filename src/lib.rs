//! Skill Scrape - Game Wiki Table Extraction
//!
//! This crate reads skill pages from a game wiki and turns their tables into
//! normalized records: tool requirement tables, resource tables and fish
//! tables, keyed by tool, resource or fish name.
//!
//! # Architecture
//!
//! ```text
//! Skills index ──▶ SkillRegistry ──▶ SkillScraper
//!                                        │
//!                         PageAccess ◀───┤ (http | browser | static)
//!                                        ▼
//!                    TableLocator ──▶ HeaderResolver ──▶ ToolExtractor
//!                         │
//!                         └────────▶ ResourceExtractor | FishExtractor
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use skill_scrape::{HttpPageAccess, ScraperConfig, SkillScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScraperConfig::default();
//!     let access = HttpPageAccess::new(config.navigation_timeout_ms, None)?;
//!
//!     let mut scraper = SkillScraper::new(access, config);
//!     scraper.init().await?;
//!
//!     let mining = scraper.scrape_skill("Mining").await?;
//!     println!("{}", serde_json::to_string_pretty(&mining)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod page;
pub mod skill;

// Re-exports for convenience
pub use browser::BrowserSession;
pub use config::{PageBackend, ScraperConfig, SkillKind};
pub use error::{Error, Result};
pub use extraction::SkillRegistry;
pub use model::SkillData;
pub use page::{BrowserPageAccess, HttpPageAccess, PageAccess, StaticPageAccess};
pub use skill::SkillScraper;
