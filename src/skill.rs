//! Skill scraping
//!
//! [`SkillScraper`] drives one Page Access session: it reads the skills index
//! once, then scrapes skill pages one at a time on request.

use crate::config::{ScraperConfig, SkillKind};
use crate::error::{Error, NavigationError, Result};
use crate::extraction::registry::link_prefix;
use crate::extraction::{
    FishExtractor, HeaderResolver, ResourceExtractor, SkillRegistry, TableLocator, ToolExtractor,
};
use crate::model::{FishingData, GatheringData, SkillData, SkillEntry};
use crate::page::{Document, PageAccess};
use tracing::{error, info, instrument};

/// Scrapes skill pages through a Page Access backend
pub struct SkillScraper<P: PageAccess> {
    access: P,
    config: ScraperConfig,
    registry: SkillRegistry,
}

impl<P: PageAccess> SkillScraper<P> {
    /// Create a scraper; call [`init`](Self::init) before scraping skills
    pub fn new(access: P, config: ScraperConfig) -> Self {
        Self {
            access,
            config,
            registry: SkillRegistry::default(),
        }
    }

    /// Build the skill registry from the index page
    pub async fn init(&mut self) -> Result<&SkillRegistry> {
        self.registry = self.build_registry().await?;
        Ok(&self.registry)
    }

    /// Skills discovered by [`init`](Self::init)
    pub fn skills(&self) -> &SkillRegistry {
        &self.registry
    }

    /// Scraper configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Release the scraper, returning its backend
    pub fn into_access(self) -> P {
        self.access
    }

    /// Read the skills index page into a registry
    #[instrument(skip(self), fields(backend = self.access.name()))]
    pub async fn build_registry(&self) -> Result<SkillRegistry> {
        let document = self.open(&self.config.site_url).await?;
        SkillRegistry::from_document(
            &document,
            &self.config.registry_selector,
            &self.config.path_delimiter,
        )
    }

    /// Scrape one skill's Tools table and its skill-specific table
    #[instrument(skip(self))]
    pub async fn scrape_skill(&self, name: &str) -> Result<SkillData> {
        self.try_scrape_skill(name)
            .await
            .map_err(|e| e.in_skill(name))
    }

    /// Scrape every configured skill present in the registry, in name order.
    ///
    /// A failing skill is logged and reported in its slot; the rest still run.
    pub async fn scrape_all(&self) -> Vec<(String, Result<SkillData>)> {
        let mut results = Vec::new();
        for name in self.config.skills.keys() {
            if self.registry.get(name).is_none() {
                info!("Configured skill '{}' not on index page, skipping", name);
                continue;
            }
            let result = self.scrape_skill(name).await;
            if let Err(ref e) = result {
                error!("{}", e);
            }
            results.push((name.clone(), result));
        }
        results
    }

    async fn try_scrape_skill(&self, name: &str) -> Result<SkillData> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownSkill(name.to_string()))?;
        let kind = self
            .config
            .kind_of(name)
            .ok_or_else(|| Error::UnsupportedSkill(name.to_string()))?;

        let document = self.open(&entry.page_path).await?;
        let data = self.extract(&document, entry, kind)?;
        info!("Scraped '{}': {} tools", name, data.tools().len());
        Ok(data)
    }

    /// Pure extraction over an already fetched skill page
    pub fn extract(
        &self,
        document: &Document,
        entry: &SkillEntry,
        kind: SkillKind,
    ) -> Result<SkillData> {
        let prefix = link_prefix(&entry.page_path, &self.config.path_delimiter).ok_or_else(|| {
            NavigationError::InvalidUrl(format!(
                "'{}' does not contain delimiter '{}'",
                entry.page_path, self.config.path_delimiter
            ))
        })?;

        let tools_table =
            TableLocator::locate(document, &self.config.tools_section, &self.config.table_class)?;
        let columns = HeaderResolver::resolve(&tools_table, prefix)?;
        let tools = ToolExtractor::extract(&tools_table, &columns)?;

        let table = TableLocator::locate(document, kind.section(), &self.config.table_class)?;
        Ok(match kind {
            SkillKind::Gathering => SkillData::Gathering(GatheringData {
                tools,
                resources: ResourceExtractor::extract(&table),
            }),
            SkillKind::Fishing => SkillData::Fishing(FishingData {
                tools,
                fish: FishExtractor::extract(&table),
            }),
        })
    }

    async fn open(&self, url: &str) -> Result<Document> {
        let raw = self
            .access
            .fetch_within(url, self.config.navigation_timeout_ms)
            .await?;
        Document::parse(&raw)
    }
}
