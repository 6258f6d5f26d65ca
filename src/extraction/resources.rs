//! Resources table rows
//!
//! Layout per row: level, resource info, xp.

use super::cell::{Cell, CellContent};
use super::table::{Row, Table};
use crate::model::{InsertIfAbsent, LevelRequirement, ResourceRecord};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Number of header rows above the body of a Resources or Fish table
pub const SECTION_HEADER_ROWS: usize = 1;

/// Positional cells of a Resources row
#[derive(Debug, Clone, Copy)]
pub struct ResourceRow<'a> {
    /// Level cell (0)
    pub level: Option<&'a Cell>,
    /// Info cell (1)
    pub info: Option<&'a Cell>,
    /// XP cell (2)
    pub xp: Option<&'a Cell>,
}

impl<'a> ResourceRow<'a> {
    /// Bind a row's data cells to their positions. Extra cells are ignored.
    pub fn from_row(row: &'a Row) -> Self {
        let cells = row.data_cells();
        Self {
            level: cells.first().copied(),
            info: cells.get(1).copied(),
            xp: cells.get(2).copied(),
        }
    }
}

/// Extracts resource records from a Resources table
pub struct ResourceExtractor;

impl ResourceExtractor {
    /// One record per body row, in table order
    #[instrument(skip(table), fields(section = %table.section))]
    pub fn extract(table: &Table) -> Vec<ResourceRecord> {
        let resources: Vec<ResourceRecord> = body_rows(table)
            .map(ResourceRow::from_row)
            .map(Self::record)
            .collect();
        debug!("Extracted {} resources", resources.len());
        resources
    }

    fn record(row: ResourceRow<'_>) -> ResourceRecord {
        let info = row.info.titled_item().unwrap_or_default();
        ResourceRecord {
            name: info.label,
            image_ref: info.image_ref,
            link: info.link,
            xp: row.xp.text().to_string(),
            requirements: level_requirements(row.level),
        }
    }
}

/// Body rows after the header, skipping rows that hold no `td` at all
pub(crate) fn body_rows(table: &Table) -> impl Iterator<Item = &Row> {
    table
        .rows
        .iter()
        .skip(SECTION_HEADER_ROWS)
        .filter(|row| !row.data_cells().is_empty())
}

/// Level cell: trimmed text keyed by the skill image's caption.
///
/// A level cell without a captioned image yields no requirement.
pub(crate) fn level_requirements(cell: Option<&Cell>) -> BTreeMap<String, LevelRequirement> {
    let mut requirements = BTreeMap::new();
    match cell.image().and_then(|img| img.caption().map(|label| (label, img))) {
        Some((label, image)) => {
            requirements.insert_if_absent(
                label.to_string(),
                LevelRequirement {
                    level: cell.text().to_string(),
                    image_ref: image.src.clone(),
                },
            );
        }
        None => debug!("Level cell has no captioned image, no requirement recorded"),
    }
    requirements
}
