//! Span-resolving grid builder
//!
//! Turns one source table into a dense rectangular grid. The build runs
//! in three phases: width discovery, header derivation, grid filling.
//! Cells spanning both rows and columns are first decomposed into
//! column-span-1 duplicates so that placement only ever deals with one
//! span axis at a time.

use crate::extract::ExtractOptions;
use crate::source::{SourceRow, SourceTable};
use crate::table::{Cell, Column, Grid};
use thiserror::Error;

/// Why a single table could not be built
#[derive(Debug, Error)]
pub enum BuildError {
    /// The table has no `<tr>` rows at all
    #[error("table has no rows")]
    NoRows,

    /// A row tried to place cells beyond the discovered table width
    #[error("row {row} places cells beyond the table width of {width}")]
    WidthOverflow { row: usize, width: usize },

    /// A rowspan reaches past the table's last row
    #[error("rowspan on row {row} extends past the last row")]
    RowspanPastEnd { row: usize },
}

/// A cell after span decomposition, ready for placement
///
/// At most one of `colspan`/`rowspan` exceeds 1.
struct PlacedCell {
    value: String,
    colspan: usize,
    rowspan: usize,
}

/// Build a dense rectangular grid from one source table.
///
/// The source table is not modified; rebuilding from the same input
/// yields an identical grid.
pub fn build_grid(table: &SourceTable, options: &ExtractOptions) -> Result<Grid, BuildError> {
    if table.rows.is_empty() {
        return Err(BuildError::NoRows);
    }

    // Phase 1: any row may be the widest, so every row is scanned
    let width = table
        .rows
        .iter()
        .map(SourceRow::span_width)
        .max()
        .unwrap_or(0);

    // Phase 2
    let columns = derive_columns(table, width, options.header);

    // Phase 3: the grid covers all source rows; the header row's slots
    // stay empty and are dropped in the finalize step
    let start = if options.header { 1 } else { 0 };
    let mut slots = vec![vec![Cell::Empty; width]; table.rows.len()];

    for (i, row) in table.rows.iter().enumerate().skip(start) {
        for (j, cell) in expand_row(row, options.raw).into_iter().enumerate() {
            place_cell(&mut slots, i, j, cell, width)?;
        }
    }

    // Phase 4
    let rows = slots.split_off(start);

    Ok(Grid {
        columns,
        rows,
        source_index: table.index,
    })
}

/// Derive column names from the first row, padding with `HEADER_<n>`
/// placeholders up to the table width
fn derive_columns(table: &SourceTable, width: usize, header: bool) -> Vec<Column> {
    let mut names: Vec<String> = Vec::new();

    if header {
        for (i, cell) in table.rows[0].cells.iter().enumerate() {
            if cell.text.is_empty() {
                names.push(format!("HEADER_{}", i + 1));
            } else {
                names.push(cell.text.clone());
            }
        }
    }
    while names.len() < width {
        names.push(format!("HEADER_{}", names.len() + 1));
    }

    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Column::new(name, i))
        .collect()
}

/// Span decomposition: a cell with colspan `c` > 1 and rowspan `r` > 1
/// becomes `c` cells of colspan 1, each keeping rowspan `r`. The result
/// is a fresh sequence; the source row is left untouched.
fn expand_row(row: &SourceRow, raw: bool) -> Vec<PlacedCell> {
    let mut out = Vec::new();
    for cell in row.data_cells() {
        let value = if raw {
            cell.html.clone()
        } else {
            cell.text.clone()
        };
        if cell.colspan > 1 && cell.rowspan > 1 {
            for _ in 0..cell.colspan {
                out.push(PlacedCell {
                    value: value.clone(),
                    colspan: 1,
                    rowspan: cell.rowspan,
                });
            }
        } else {
            out.push(PlacedCell {
                value,
                colspan: cell.colspan,
                rowspan: cell.rowspan,
            });
        }
    }
    out
}

/// Place one decomposed cell: advance the cursor to the first unfilled
/// slot, write the value, then replicate rightward (colspan) or downward
/// (rowspan). Downward replication slides right past slots that a lower
/// row's own cells have already claimed.
fn place_cell(
    slots: &mut [Vec<Cell>],
    row: usize,
    start_col: usize,
    cell: PlacedCell,
    width: usize,
) -> Result<(), BuildError> {
    let col = next_open(&slots[row], start_col).ok_or(BuildError::WidthOverflow { row, width })?;
    slots[row][col] = Cell::Filled(cell.value.clone());

    if cell.colspan > 1 && cell.rowspan == 1 {
        for c in col + 1..col + cell.colspan {
            if c >= width {
                return Err(BuildError::WidthOverflow { row, width });
            }
            slots[row][c] = Cell::Filled(cell.value.clone());
        }
    } else if cell.rowspan > 1 && cell.colspan == 1 {
        // The slide cursor is carried across target rows, not reset per
        // row: a slot claimed in one row shifts the remaining rows too
        let mut c = col;
        for r in row + 1..row + cell.rowspan {
            if r >= slots.len() {
                return Err(BuildError::RowspanPastEnd { row });
            }
            c = next_open(&slots[r], c).ok_or(BuildError::WidthOverflow { row: r, width })?;
            slots[r][c] = Cell::Filled(cell.value.clone());
        }
    }

    Ok(())
}

/// First unfilled column at or after `from`
fn next_open(row: &[Cell], from: usize) -> Option<usize> {
    (from..row.len()).find(|&c| row[c].is_empty())
}
