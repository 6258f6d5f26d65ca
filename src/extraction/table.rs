//! Section tables
//!
//! A wiki section is a heading carrying an anchor id followed by content
//! siblings. [`TableLocator`] finds the single data table inside one section
//! and reads it into a [`Table`] of [`Cell`]s.

use super::cell::{Cell, CellKind};
use crate::error::{Result, StructureError};
use crate::page::Document;
use scraper::ElementRef;
use tracing::{debug, instrument};
use url::Url;

/// One `tr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// `th` and `td` cells in column order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// `th` cells in order
    pub fn header_cells(&self) -> Vec<&Cell> {
        self.cells_of(CellKind::Header)
    }

    /// `td` cells in order
    pub fn data_cells(&self) -> Vec<&Cell> {
        self.cells_of(CellKind::Data)
    }

    fn cells_of(&self, kind: CellKind) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.kind == kind).collect()
    }

    fn from_element(tr: ElementRef<'_>, base: &Url) -> Self {
        let cells = tr
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| Cell::from_element(el, base))
            .collect();
        Self { cells }
    }
}

/// Rows of the table found in one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Section anchor the table was found under
    pub section: String,
    /// Every `tr`, in document order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows
    pub fn new<S: Into<String>>(section: S, rows: Vec<Row>) -> Self {
        Self {
            section: section.into(),
            rows,
        }
    }

    /// Fail unless the table has at least `expected` rows
    pub fn require_rows(&self, expected: usize) -> std::result::Result<(), StructureError> {
        if self.rows.len() < expected {
            return Err(StructureError::MissingRows {
                section: self.section.clone(),
                expected,
                found: self.rows.len(),
            });
        }
        Ok(())
    }

    fn from_element(section: &str, table: ElementRef<'_>, base: &Url) -> Self {
        // `tr` elements sit under implicit or explicit thead/tbody/tfoot
        // sections; nested tables inside cells are not part of this table.
        let mut rows = Vec::new();
        for child in table.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "tr" => rows.push(Row::from_element(child, base)),
                "thead" | "tbody" | "tfoot" => rows.extend(
                    child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|el| el.value().name() == "tr")
                        .map(|tr| Row::from_element(tr, base)),
                ),
                _ => {}
            }
        }
        Self::new(section, rows)
    }
}

/// Finds the data table belonging to a section anchor
pub struct TableLocator;

impl TableLocator {
    /// Locate the one `table_class` table in the section anchored by `section`.
    ///
    /// Candidates are the siblings following the anchor's parent, up to the
    /// next section heading.
    #[instrument(skip(document))]
    pub fn locate(document: &Document, section: &str, table_class: &str) -> Result<Table> {
        let anchor = document
            .element_by_id(section)
            .ok_or_else(|| StructureError::AnchorNotFound {
                section: section.to_string(),
            })?;

        let heading = anchor
            .parent()
            .ok_or_else(|| StructureError::DetachedAnchor {
                section: section.to_string(),
            })?;

        let mut candidates: Vec<ElementRef<'_>> = heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|el| !is_section_heading(*el))
            .filter(|el| el.value().name() == "table" && has_class(*el, table_class))
            .collect();

        let table = match candidates.len() {
            1 => candidates.remove(0),
            0 => {
                return Err(StructureError::TableNotFound {
                    section: section.to_string(),
                    class: table_class.to_string(),
                }
                .into())
            }
            count => {
                return Err(StructureError::AmbiguousTable {
                    section: section.to_string(),
                    class: table_class.to_string(),
                    count,
                }
                .into())
            }
        };

        let table = Table::from_element(section, table, document.url());
        debug!("Located '{}' table with {} rows", section, table.rows.len());
        Ok(table)
    }
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn is_section_heading(element: ElementRef<'_>) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    ) || has_class(element, "mw-heading")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RawPage;

    fn doc(html: &str) -> Document {
        Document::parse(&RawPage::new("https://wiki.test/w/Mining", html)).unwrap()
    }

    const PAGE: &str = r#"
        <div class="mw-parser-output">
          <h2><span class="mw-headline" id="Tools">Tools</span></h2>
          <p>Tools used for mining.</p>
          <table class="wikitable">
            <tr><th>Tool</th><th>Requirements</th></tr>
            <tr><th>A</th></tr>
            <tr><td>x</td></tr>
          </table>
          <h2><span class="mw-headline" id="Resources">Resources</span></h2>
          <table class="navbox"><tr><td>nav</td></tr></table>
          <table class="wikitable sortable">
            <tbody><tr><th>Level</th></tr><tr><td>1</td></tr></tbody>
          </table>
          <h2><span class="mw-headline" id="Trivia">Trivia</span></h2>
          <table class="wikitable"><tr><td>a</td></tr></table>
          <table class="wikitable"><tr><td>b</td></tr></table>
        </div>
    "#;

    #[test]
    fn test_locates_table_after_anchor() {
        let d = doc(PAGE);
        let table = TableLocator::locate(&d, "Tools", "wikitable").unwrap();
        assert_eq!(table.section, "Tools");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].header_cells().len(), 2);
        assert_eq!(table.rows[2].data_cells()[0].text, "x");
    }

    #[test]
    fn test_stops_at_next_heading() {
        let d = doc(PAGE);
        let table = TableLocator::locate(&d, "Resources", "wikitable").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].data_cells()[0].text, "1");
    }

    #[test]
    fn test_missing_anchor() {
        let d = doc(PAGE);
        let err = TableLocator::locate(&d, "Fish", "wikitable").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Structure(StructureError::AnchorNotFound { .. })
        ));
    }

    #[test]
    fn test_ambiguous_section() {
        let d = doc(PAGE);
        let err = TableLocator::locate(&d, "Trivia", "wikitable").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Structure(StructureError::AmbiguousTable { count: 2, .. })
        ));
    }

    #[test]
    fn test_no_table_in_section() {
        let d = doc(r#"<h2><span id="Fish">Fish</span></h2><p>None yet.</p>"#);
        let err = TableLocator::locate(&d, "Fish", "wikitable").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Structure(StructureError::TableNotFound { .. })
        ));
    }

    #[test]
    fn test_modern_heading_markup() {
        let d = doc(
            r#"<div class="mw-heading mw-heading2"><h2 id="Fish">Fish</h2></div>
               <table class="wikitable"><tr><td>1</td></tr></table>
               <div class="mw-heading mw-heading2"><h2 id="Other">Other</h2></div>
               <table class="wikitable"><tr><td>2</td></tr></table>"#,
        );
        let table = TableLocator::locate(&d, "Fish", "wikitable").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].data_cells()[0].text, "1");
    }

    #[test]
    fn test_require_rows() {
        let table = Table::new("Tools", vec![Row::default()]);
        assert_eq!(
            table.require_rows(2),
            Err(StructureError::MissingRows {
                section: "Tools".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert!(table.require_rows(1).is_ok());
    }
}
