//! Tools table rows
//!
//! Each body row names a tool in its first cell and gives one level per
//! requirement column in the remaining cells. Rows sharing a tool identity
//! merge into one record; within a record the first level seen for a
//! requirement is kept.

use super::cell::{Cell, CellContent};
use super::header::TOOL_BODY_START;
use super::table::Table;
use crate::error::{ExtractionError, Result};
use crate::model::{InsertIfAbsent, RequirementColumn, ToolRecord, ToolRequirement};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Extracts tool records from a Tools table
pub struct ToolExtractor;

impl ToolExtractor {
    /// Extract every tool row against the resolved header columns
    #[instrument(skip(table, columns), fields(section = %table.section))]
    pub fn extract(
        table: &Table,
        columns: &[RequirementColumn],
    ) -> Result<BTreeMap<String, ToolRecord>> {
        let mut tools: BTreeMap<String, ToolRecord> = BTreeMap::new();

        for (row_index, row) in table.rows.iter().enumerate().skip(TOOL_BODY_START) {
            let cells = row.data_cells();
            let Some((identity_cell, levels)) = cells.split_first() else {
                debug!("Row {} has no data cells, skipping", row_index);
                continue;
            };

            let identity = tool_identity(identity_cell).ok_or_else(|| {
                ExtractionError::MissingIdentity {
                    section: table.section.clone(),
                    row: row_index,
                }
            })?;

            let record = tools
                .entry(identity.clone())
                .or_insert_with(|| ToolRecord::new(identity));

            for (offset, cell) in levels.iter().enumerate() {
                let column = columns.get(offset).ok_or_else(|| ExtractionError::UnmappedColumn {
                    section: table.section.clone(),
                    row: row_index,
                    column: offset + 1,
                    columns: columns.len(),
                })?;

                let inserted = record.requirements.insert_if_absent(
                    column.name.clone(),
                    ToolRequirement {
                        level: cell.text().to_string(),
                        image_ref: column.image_ref.clone(),
                        link: column.link.clone(),
                    },
                );
                if !inserted {
                    debug!(
                        "Row {} repeats '{}' for '{}', keeping first",
                        row_index, column.name, record.identity
                    );
                }
            }
        }

        debug!("Extracted {} tools", tools.len());
        Ok(tools)
    }
}

/// Title of the first link, falling back to the cell's text
fn tool_identity(cell: &Cell) -> Option<String> {
    cell.link()
        .and_then(|link| link.title.as_deref())
        .or(Some(cell.text()).filter(|text| !text.is_empty()))
        .map(String::from)
}
