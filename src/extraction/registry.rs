//! Skill registry
//!
//! The skills index page is an image map; every `area` links to one skill's
//! page. A skill's name is the part of its path after the path delimiter,
//! e.g. `https://titanreach.wiki/w/Mining` with delimiter `/w/` is `Mining`.

use crate::error::Result;
use crate::model::{InsertIfAbsent, SkillEntry};
use crate::page::Document;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Skills by name, first-seen path wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillRegistry {
    skills: BTreeMap<String, SkillEntry>,
}

impl SkillRegistry {
    /// Build a registry from skill page paths
    pub fn from_paths<'a, I>(paths: I, delimiter: &str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut skills = BTreeMap::new();
        for path in paths {
            let Some(name) = skill_name(path, delimiter) else {
                warn!("Skipping area link without a skill name: {}", path);
                continue;
            };

            let entry = SkillEntry {
                name: name.to_string(),
                page_path: path.to_string(),
            };
            if !skills.insert_if_absent(name.to_string(), entry) {
                debug!("Duplicate area link for '{}' ignored: {}", name, path);
            }
        }
        Self { skills }
    }

    /// Build a registry from the `area` elements matched by `area_selector`
    pub fn from_document(document: &Document, area_selector: &str, delimiter: &str) -> Result<Self> {
        let paths: Vec<String> = document
            .select_all(area_selector)?
            .into_iter()
            .filter_map(|area| area.value().attr("href"))
            .map(|href| document.resolve(href))
            .collect();

        let registry = Self::from_paths(paths.iter().map(String::as_str), delimiter);
        info!(
            "Found {} skills from {} area links",
            registry.len(),
            paths.len()
        );
        Ok(registry)
    }

    /// Look up a skill by name
    pub fn get(&self, name: &str) -> Option<&SkillEntry> {
        self.skills.get(name)
    }

    /// Skill names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// All entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &SkillEntry> {
        self.skills.values()
    }

    /// Number of skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether no skills were found
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// The substring after the first occurrence of `delimiter`, if non-empty
pub fn skill_name<'a>(path: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() {
        return None;
    }
    path.find(delimiter)
        .map(|at| &path[at + delimiter.len()..])
        .filter(|name| !name.is_empty())
}

/// The page path up to and including the first `delimiter`
pub fn link_prefix<'a>(path: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() {
        return None;
    }
    path.find(delimiter).map(|at| &path[..at + delimiter.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RawPage;
    use proptest::prelude::*;

    #[test]
    fn test_skill_name_after_delimiter() {
        assert_eq!(
            skill_name("https://titanreach.wiki/w/Mining", "/w/"),
            Some("Mining")
        );
        assert_eq!(skill_name("https://titanreach.wiki/Mining", "/w/"), None);
        assert_eq!(skill_name("https://titanreach.wiki/w/", "/w/"), None);
        assert_eq!(skill_name("https://titanreach.wiki/w/Mining", ""), None);
    }

    #[test]
    fn test_link_prefix() {
        assert_eq!(
            link_prefix("https://titanreach.wiki/w/Fishing", "/w/"),
            Some("https://titanreach.wiki/w/")
        );
        assert_eq!(link_prefix("https://titanreach.wiki/Fishing", "/w/"), None);
    }

    #[test]
    fn test_duplicate_names_keep_first_path() {
        let registry = SkillRegistry::from_paths(
            [
                "https://wiki.test/w/Mining",
                "https://wiki.test/w/Mining#Tools",
                "https://wiki.test/w/Mining",
            ],
            "/w/",
        );
        // Fragments make a distinct name; exact duplicates collapse.
        assert_eq!(registry.len(), 2);

        let registry = SkillRegistry::from_paths(
            ["https://a.test/w/Mining", "https://b.test/w/Mining"],
            "/w/",
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("Mining").unwrap().page_path,
            "https://a.test/w/Mining"
        );
    }

    #[test]
    fn test_from_document_reads_area_links() {
        let html = r##"
            <div id="skillslayoutlarge">
              <map name="skills">
                <area shape="rect" href="/w/Mining" title="Mining">
                <area shape="rect" href="/w/Fishing" title="Fishing">
                <area shape="rect" href="/w/Mining" title="Mining">
                <area shape="rect" title="No link">
              </map>
            </div>
            <map><area href="/w/Elsewhere"></map>
        "##;
        let doc = Document::parse(&RawPage::new("https://wiki.test/w/Skills", html)).unwrap();
        let registry =
            SkillRegistry::from_document(&doc, "#skillslayoutlarge area", "/w/").unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Fishing", "Mining"]);
        assert_eq!(
            registry.get("Fishing").unwrap().page_path,
            "https://wiki.test/w/Fishing"
        );
    }

    proptest! {
        #[test]
        fn prop_one_entry_per_distinct_name(
            names in proptest::collection::vec("[A-Za-z]{1,8}", 0..20),
            hosts in proptest::collection::vec("[a-z]{1,5}", 1..4),
        ) {
            let paths: Vec<String> = names
                .iter()
                .enumerate()
                .map(|(i, name)| format!("https://{}.test/w/{}", hosts[i % hosts.len()], name))
                .collect();
            let registry = SkillRegistry::from_paths(paths.iter().map(String::as_str), "/w/");

            let distinct: std::collections::BTreeSet<_> = names.iter().collect();
            prop_assert_eq!(registry.len(), distinct.len());

            for name in &names {
                let first = paths
                    .iter()
                    .find(|p| p.ends_with(&format!("/w/{}", name)))
                    .unwrap();
                prop_assert_eq!(&registry.get(name).unwrap().page_path, first);
            }
        }
    }
}
