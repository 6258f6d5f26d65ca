//! Tools header resolution
//!
//! The Tools table has two header rows. Row 0 is a decorative super-header
//! ("Tool" / "Requirements") and is always skipped; row 1 carries one image
//! per requirement column. The skip is a fixed property of the wiki's markup
//! and is not detected from content.

use super::cell::{CellContent, Image};
use super::table::Table;
use crate::error::{MalformedHeaderError, Result};
use crate::model::RequirementColumn;
use tracing::{debug, instrument};

/// Row index of the requirement header row in a Tools table
pub const TOOL_HEADER_ROW: usize = 1;

/// Row index of the first tool row in a Tools table
pub const TOOL_BODY_START: usize = 2;

/// Turns the Tools header row into requirement columns
pub struct HeaderResolver;

impl HeaderResolver {
    /// Resolve the requirement columns of a Tools table.
    ///
    /// `link_prefix` is the owning page's URL up to and including the path
    /// delimiter; each column links to `link_prefix + name`.
    #[instrument(skip(table), fields(section = %table.section))]
    pub fn resolve(table: &Table, link_prefix: &str) -> Result<Vec<RequirementColumn>> {
        table.require_rows(TOOL_BODY_START)?;

        let header = &table.rows[TOOL_HEADER_ROW];
        let mut columns = Vec::new();

        for (column, cell) in header.header_cells().into_iter().enumerate() {
            let image = cell
                .linked_image()
                .ok_or_else(|| MalformedHeaderError::MissingImage {
                    section: table.section.clone(),
                    row: TOOL_HEADER_ROW,
                    column,
                })?;
            let name = image
                .label()
                .ok_or_else(|| MalformedHeaderError::EmptyName {
                    section: table.section.clone(),
                    row: TOOL_HEADER_ROW,
                    column,
                })?;

            columns.push(column_for(name, image, link_prefix));
        }

        debug!("Resolved {} requirement columns", columns.len());
        Ok(columns)
    }
}

fn column_for(name: &str, image: &Image, link_prefix: &str) -> RequirementColumn {
    RequirementColumn {
        name: name.to_string(),
        image_ref: image.src.clone(),
        link: format!("{}{}", link_prefix, name),
    }
}
