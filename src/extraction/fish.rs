//! Fish table rows
//!
//! Layout per row: level, fish info, xp, tool, bait.

use super::cell::{Cell, CellContent};
use super::resources::{body_rows, level_requirements};
use super::table::{Row, Table};
use crate::model::{FishRecord, InsertIfAbsent, ItemRef};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Positional cells of a Fish row
#[derive(Debug, Clone, Copy)]
pub struct FishRow<'a> {
    /// Level cell (0)
    pub level: Option<&'a Cell>,
    /// Info cell (1)
    pub info: Option<&'a Cell>,
    /// XP cell (2)
    pub xp: Option<&'a Cell>,
    /// Tool cell (3)
    pub tool: Option<&'a Cell>,
    /// Bait cell (4)
    pub bait: Option<&'a Cell>,
}

impl<'a> FishRow<'a> {
    /// Bind a row's data cells to their positions. Extra cells are ignored.
    pub fn from_row(row: &'a Row) -> Self {
        let cells = row.data_cells();
        let at = |i: usize| cells.get(i).copied();
        Self {
            level: at(0),
            info: at(1),
            xp: at(2),
            tool: at(3),
            bait: at(4),
        }
    }
}

/// Extracts fish records from a Fish table
pub struct FishExtractor;

impl FishExtractor {
    /// One record per body row, in table order
    #[instrument(skip(table), fields(section = %table.section))]
    pub fn extract(table: &Table) -> Vec<FishRecord> {
        let fish: Vec<FishRecord> = body_rows(table)
            .map(FishRow::from_row)
            .map(Self::record)
            .collect();
        debug!("Extracted {} fish", fish.len());
        fish
    }

    fn record(row: FishRow<'_>) -> FishRecord {
        let info = row.info.titled_item().unwrap_or_default();

        let mut tool = BTreeMap::new();
        add_item(&mut tool, row.tool);

        // Stays `None` unless the bait cell links to something.
        let bait = row.bait.link().map(|_| {
            let mut bait = BTreeMap::new();
            add_item(&mut bait, row.bait);
            bait
        });

        FishRecord {
            name: info.label,
            image_ref: info.image_ref,
            link: info.link,
            xp: row.xp.text().to_string(),
            requirements: level_requirements(row.level),
            tool,
            bait,
        }
    }
}

fn add_item(items: &mut BTreeMap<String, ItemRef>, cell: Option<&Cell>) {
    if let Some(item) = cell.pictured_item() {
        items.insert_if_absent(
            item.label,
            ItemRef {
                image_ref: item.image_ref,
                link: item.link,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::cell::{Image, Link};
    use pretty_assertions::assert_eq;

    fn pictured_link(name: &str) -> Cell {
        Cell::data("").with_link(Link {
            href: format!("https://wiki.test/w/{}", name),
            title: Some(name.to_string()),
            image: Some(Image {
                src: format!("https://wiki.test/images/{}.png", name),
                alt: None,
                title: Some(name.to_string()),
            }),
        })
    }

    fn level_cell(level: &str) -> Cell {
        Cell::data(level).with_image(Image {
            src: "https://wiki.test/images/Fishing.png".to_string(),
            alt: Some("Fishing".to_string()),
            title: None,
        })
    }

    fn table(body: Vec<Row>) -> Table {
        let mut rows = vec![Row::new(vec![Cell::header("Level"), Cell::header("Fish")])];
        rows.extend(body);
        Table::new("Fish", rows)
    }

    #[test]
    fn test_extracts_full_fish_row() {
        let t = table(vec![Row::new(vec![
            level_cell("20"),
            pictured_link("Salmon"),
            Cell::data("50"),
            pictured_link("Fly Rod"),
            pictured_link("Feather"),
        ])]);

        let fish = FishExtractor::extract(&t);
        let salmon = &fish[0];
        assert_eq!(salmon.name, "Salmon");
        assert_eq!(salmon.xp, "50");
        assert_eq!(salmon.requirements["Fishing"].level, "20");
        assert_eq!(
            salmon.tool["Fly Rod"],
            ItemRef {
                image_ref: "https://wiki.test/images/Fly Rod.png".to_string(),
                link: "https://wiki.test/w/Fly Rod".to_string(),
            }
        );
        let bait = salmon.bait.as_ref().unwrap();
        assert_eq!(bait.len(), 1);
        assert_eq!(bait["Feather"].link, "https://wiki.test/w/Feather");
    }

    #[test]
    fn test_no_bait_is_none() {
        let t = table(vec![Row::new(vec![
            level_cell("1"),
            pictured_link("Shrimp"),
            Cell::data("10"),
            pictured_link("Small Net"),
            Cell::data(""),
        ])]);
        let fish = FishExtractor::extract(&t);
        assert!(fish[0].bait.is_none());
        assert_eq!(fish[0].tool.len(), 1);
    }

    #[test]
    fn test_short_row_has_no_tool_or_bait() {
        let t = table(vec![Row::new(vec![level_cell("1"), pictured_link("Shrimp")])]);
        let fish = FishExtractor::extract(&t);
        assert!(fish[0].tool.is_empty());
        assert!(fish[0].bait.is_none());
        assert_eq!(fish[0].xp, "");
    }

    #[test]
    fn test_repeated_item_keeps_first() {
        let mut items = BTreeMap::new();
        let first = pictured_link("Worm");
        let mut second = pictured_link("Worm");
        if let Some(link) = second.link.as_mut() {
            link.href = "https://wiki.test/w/Other".to_string();
        }

        add_item(&mut items, Some(&first));
        add_item(&mut items, Some(&second));
        assert_eq!(items.len(), 1);
        assert_eq!(items["Worm"].link, "https://wiki.test/w/Worm");
    }
}
