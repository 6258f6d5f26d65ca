//! Table extraction module
//!
//! Turns wiki tables into keyed records: the cell model, section table
//! lookup, Tools header resolution, the three row extractors and the skill
//! registry.

pub mod cell;
pub mod fish;
pub mod header;
pub mod registry;
pub mod resources;
pub mod table;
pub mod tools;

pub use cell::{Cell, CellContent, CellKind, Image, Link, LinkedItem};
pub use fish::{FishExtractor, FishRow};
pub use header::{HeaderResolver, TOOL_BODY_START, TOOL_HEADER_ROW};
pub use registry::SkillRegistry;
pub use resources::{ResourceExtractor, ResourceRow, SECTION_HEADER_ROWS};
pub use table::{Row, Table, TableLocator};
pub use tools::ToolExtractor;
