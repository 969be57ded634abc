//! wikigrid-core: Extract dense rectangular grids from spanned HTML tables
//!
//! HTML tables encode a grid implicitly: a cell with `rowspan`/`colspan`
//! reserves positions in rows and columns beyond its own. This library
//! provides functionality to:
//! - Select candidate tables from a parsed page by class name or position
//! - Resolve spanning cells into a dense rectangular grid, one value per
//!   logical (row, column) position
//! - Derive a header row, padding missing names with placeholders
//! - Report which tables could not be processed instead of dropping them
//!   silently

pub mod builder;
pub mod error;
pub mod extract;
pub mod source;
pub mod table;

pub use builder::{build_grid, BuildError};
pub use error::{Error, Result};
pub use extract::{
    extract_file, extract_report, extract_tables, ExtractOptions, ExtractReport, SkippedTable,
    DEFAULT_TABLE_CLASS,
};
pub use source::{CellKind, SourceCell, SourceRow, SourceTable};
pub use table::{Cell, Column, Grid};
