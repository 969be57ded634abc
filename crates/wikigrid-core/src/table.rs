//! Output table types: cells, columns and rectangular grids

use serde::{Deserialize, Serialize};

/// A slot in the output grid
///
/// A slot starts out `Empty` and is written at most once during grid
/// filling; the placement cursor only ever advances to the next `Empty`
/// slot, so a `Filled` value is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A value placed from a source cell (or replicated from a span)
    Filled(String),
    /// Never written; JSON-serializes as null
    Empty,
}

impl Cell {
    /// Check if the slot is still unfilled
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Get the value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Filled(s) => Some(s),
            Cell::Empty => None,
        }
    }

    /// Convert to a display string (`Empty` becomes the empty string)
    pub fn to_string_value(&self) -> String {
        match self {
            Cell::Filled(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Filled(s) => write!(f, "{}", s),
            Cell::Empty => write!(f, ""),
        }
    }
}

/// A column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name (header text or a `HEADER_<n>` placeholder)
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A dense rectangular grid built from one source table
///
/// Every row has exactly `columns.len()` cells; values covered by
/// `rowspan`/`colspan` in the source markup appear once per logical
/// position they span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Column definitions, one per logical column
    pub columns: Vec<Column>,
    /// Body rows (the header row is not part of the body)
    pub rows: Vec<Vec<Cell>>,
    /// Position of the source table within the selected set on the page
    pub source_index: usize,
}

impl Grid {
    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of body rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a cell by (row, column) position
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid {
            columns: vec![
                Column::new("Name".to_string(), 0),
                Column::new("Value".to_string(), 1),
            ],
            rows: vec![
                vec![
                    Cell::Filled("foo".to_string()),
                    Cell::Filled("100".to_string()),
                ],
                vec![Cell::Filled("bar".to_string()), Cell::Empty],
            ],
            source_index: 0,
        }
    }

    #[test]
    fn test_cell_is_empty() {
        assert!(Cell::Empty.is_empty());
        assert!(!Cell::Filled(String::new()).is_empty());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Filled("x".to_string()).to_string(), "x");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Empty.to_string_value(), "");
    }

    #[test]
    fn test_cell_as_str() {
        assert_eq!(Cell::Filled("x".to_string()).as_str(), Some("x"));
        assert_eq!(Cell::Empty.as_str(), None);
    }

    #[test]
    fn test_cell_json_shape() {
        let row = vec![Cell::Filled("a".to_string()), Cell::Empty];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["a",null]"#);

        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_grid_accessors() {
        let grid = sample_grid();
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.find_column("Value").map(|c| c.index), Some(1));
        assert!(grid.find_column("Missing").is_none());
        assert_eq!(grid.get(0, 1), Some(&Cell::Filled("100".to_string())));
        assert_eq!(grid.get(1, 1), Some(&Cell::Empty));
        assert_eq!(grid.get(2, 0), None);
    }
}
