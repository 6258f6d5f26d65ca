//! Scraped data model
//!
//! Records produced by the extractors. Every map is a `BTreeMap` so output is
//! deterministic across runs, and every "first one wins" rule goes through
//! [`InsertIfAbsent`].

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Insert a value only when the key is not yet present.
pub trait InsertIfAbsent<K, V> {
    /// Returns `true` when the value was inserted, `false` when an existing
    /// entry was kept and `value` dropped.
    fn insert_if_absent(&mut self, key: K, value: V) -> bool;
}

impl<K: Ord, V> InsertIfAbsent<K, V> for BTreeMap<K, V> {
    fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        match self.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}

/// A skill discovered on the skills index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Display name derived from the page path
    pub name: String,
    /// Absolute URL of the skill's page
    pub page_path: String,
}

/// A header-derived requirement column of a Tools table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementColumn {
    /// Requirement (skill) name, never empty
    pub name: String,
    /// Header image source
    pub image_ref: String,
    /// Link to the requirement's wiki page
    pub link: String,
}

/// One tool's level for one requirement column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequirement {
    /// Level text as rendered
    pub level: String,
    /// Requirement image source
    pub image_ref: String,
    /// Requirement page link
    pub link: String,
}

/// A tool and its requirements, merged across rows sharing its identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Tool name
    pub identity: String,
    /// Requirement name -> level
    pub requirements: BTreeMap<String, ToolRequirement>,
}

impl ToolRecord {
    /// Create an empty record for a tool
    pub fn new<S: Into<String>>(identity: S) -> Self {
        Self {
            identity: identity.into(),
            requirements: BTreeMap::new(),
        }
    }
}

/// Level needed to gather a resource or catch a fish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRequirement {
    /// Trimmed level text
    pub level: String,
    /// Skill image source
    pub image_ref: String,
}

/// A linked item (tool or bait) used by a fishing method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    /// Item image source, empty when the link has no image
    pub image_ref: String,
    /// Item page link
    pub link: String,
}

/// One row of a Resources table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    /// Resource name, empty when the info cell has no link
    pub name: String,
    /// Resource image source
    pub image_ref: String,
    /// Resource page link
    pub link: String,
    /// XP yield, verbatim (may be a range or annotated)
    pub xp: String,
    /// Skill name -> level
    pub requirements: BTreeMap<String, LevelRequirement>,
}

/// One row of a Fish table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishRecord {
    /// Fish name, empty when the info cell has no link
    pub name: String,
    /// Fish image source
    pub image_ref: String,
    /// Fish page link
    pub link: String,
    /// XP yield, verbatim
    pub xp: String,
    /// Skill name -> level
    pub requirements: BTreeMap<String, LevelRequirement>,
    /// Tool name -> item
    pub tool: BTreeMap<String, ItemRef>,
    /// Bait name -> item; `None` means no bait is used
    pub bait: Option<BTreeMap<String, ItemRef>>,
}

/// Data scraped from a resource-gathering skill page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheringData {
    /// Tool identity -> record
    pub tools: BTreeMap<String, ToolRecord>,
    /// Resources in table order
    pub resources: Vec<ResourceRecord>,
}

/// Data scraped from a fishing skill page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishingData {
    /// Tool identity -> record
    pub tools: BTreeMap<String, ToolRecord>,
    /// Fish in table order
    pub fish: Vec<FishRecord>,
}

/// Everything scraped from one skill page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillData {
    /// `{ tools, resources }`
    Gathering(GatheringData),
    /// `{ tools, fish }`
    Fishing(FishingData),
}

impl SkillData {
    /// Tools table of either shape
    pub fn tools(&self) -> &BTreeMap<String, ToolRecord> {
        match self {
            SkillData::Gathering(data) => &data.tools,
            SkillData::Fishing(data) => &data.tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let mut map = BTreeMap::new();
        assert!(map.insert_if_absent("Pickaxe", 1));
        assert!(!map.insert_if_absent("Pickaxe", 5));
        assert_eq!(map.get("Pickaxe"), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_fish_record_serializes_null_bait() {
        let fish = FishRecord {
            name: "Trout".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&fish).unwrap();
        assert_eq!(json["bait"], serde_json::Value::Null);
        assert_eq!(json["imageRef"], "");
        assert!(json["tool"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_skill_data_shape() {
        let data = SkillData::Fishing(FishingData::default());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("tools").is_some());
        assert!(json.get("fish").is_some());
        assert!(json.get("resources").is_none());

        let data = SkillData::Gathering(GatheringData::default());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("resources").is_some());
    }

    #[test]
    fn test_skill_entry_field_names() {
        let entry = SkillEntry {
            name: "Mining".to_string(),
            page_path: "https://wiki.test/w/Mining".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"pagePath\":\"https://wiki.test/w/Mining\""));
    }
}
