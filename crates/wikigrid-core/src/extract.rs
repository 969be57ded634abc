//! Table selection and the multi-table extraction driver

use crate::builder::build_grid;
use crate::error::{Error, Result};
use crate::source::SourceTable;
use crate::table::Grid;
use scraper::{CaseSensitivity, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class name selected by default (Wikipedia's data table class)
pub const DEFAULT_TABLE_CLASS: &str = "wikitable";

/// Extraction options
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Only consider tables carrying this class token; `None` takes
    /// every `<table>` on the page
    pub by_class: Option<String>,
    /// Restrict extraction to these positions within the selected set;
    /// `None` takes all of them
    pub table_indices: Option<Vec<usize>>,
    /// Emit each cell's raw inner markup instead of normalized text
    pub raw: bool,
    /// Treat the first row as a header row
    pub header: bool,
    /// Skip tables that fail to build instead of aborting
    pub errors_ignore: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            by_class: Some(DEFAULT_TABLE_CLASS.to_string()),
            table_indices: None,
            raw: false,
            header: true,
            errors_ignore: true,
        }
    }
}

/// A table that was selected but could not be built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedTable {
    /// Position within the selected table set
    pub index: usize,
    /// Why the build failed
    pub reason: String,
}

/// Outcome of extracting one page: the grids that built, plus which
/// selected tables were skipped and why
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractReport {
    /// Successfully built grids, in page order
    pub grids: Vec<Grid>,
    /// Tables dropped under `errors_ignore`
    pub skipped: Vec<SkippedTable>,
}

/// Extract all selected tables from an HTML document, reporting
/// per-table failures instead of silently dropping them.
///
/// Selection errors (no tables, no index intersection) always abort;
/// per-table build failures are collected into the skip list, or abort
/// with [`Error::TableProcessing`] when `errors_ignore` is off.
pub fn extract_report(html: &str, options: &ExtractOptions) -> Result<ExtractReport> {
    let document = Html::parse_document(html);
    let tables = select_tables(&document, options)?;

    let mut grids = Vec::new();
    let mut skipped = Vec::new();

    for table in &tables {
        match build_grid(table, options) {
            Ok(grid) => grids.push(grid),
            Err(e) if options.errors_ignore => skipped.push(SkippedTable {
                index: table.index,
                reason: e.to_string(),
            }),
            Err(e) => {
                return Err(Error::TableProcessing {
                    index: table.index,
                    message: e.to_string(),
                })
            }
        }
    }

    Ok(ExtractReport { grids, skipped })
}

/// Extract all selected tables from an HTML document, returning just
/// the grids (skipped tables are dropped)
pub fn extract_tables(html: &str, options: &ExtractOptions) -> Result<Vec<Grid>> {
    Ok(extract_report(html, options)?.grids)
}

/// Read an HTML file from disk and extract its tables
pub fn extract_file<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<ExtractReport> {
    let path = path.as_ref();
    let html = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    extract_report(&html, options)
}

/// Select candidate tables from the document and lift them into the
/// source model
fn select_tables(document: &Html, options: &ExtractOptions) -> Result<Vec<SourceTable>> {
    let selector = Selector::parse("table").unwrap();

    let matched: Vec<_> = document
        .select(&selector)
        .filter(|el| match options.by_class.as_deref() {
            Some(class) => el.value().has_class(class, CaseSensitivity::CaseSensitive),
            None => true,
        })
        .collect();

    if matched.is_empty() {
        return Err(Error::NoTablesFound);
    }

    let tables: Vec<SourceTable> = matched
        .iter()
        .enumerate()
        .filter(|(i, _)| match &options.table_indices {
            Some(indices) => indices.contains(i),
            None => true,
        })
        .map(|(i, el)| SourceTable::from_element(*el, i))
        .collect();

    if tables.is_empty() {
        return Err(Error::InvalidTableIndex {
            indices: options.table_indices.clone().unwrap_or_default(),
            table_count: matched.len(),
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    const THREE_TABLES: &str = "<html><body>\
        <table class=\"wikitable\"><tr><th>A</th></tr><tr><td>1</td></tr></table>\
        <table><tr><th>B</th></tr><tr><td>2</td></tr></table>\
        <table class=\"wikitable sortable\"><tr><th>C</th></tr><tr><td>3</td></tr></table>\
        </body></html>";

    fn first_cell(grid: &Grid) -> &str {
        match &grid.rows[0][0] {
            Cell::Filled(s) => s,
            Cell::Empty => "",
        }
    }

    #[test]
    fn test_default_class_filter() {
        let report = extract_report(THREE_TABLES, &ExtractOptions::default()).unwrap();
        // Class token matching also catches "wikitable sortable"
        assert_eq!(report.grids.len(), 2);
        assert_eq!(first_cell(&report.grids[0]), "1");
        assert_eq!(first_cell(&report.grids[1]), "3");
        assert_eq!(report.grids[0].source_index, 0);
        assert_eq!(report.grids[1].source_index, 1);
    }

    #[test]
    fn test_no_class_takes_all_tables() {
        let options = ExtractOptions {
            by_class: None,
            ..ExtractOptions::default()
        };
        let grids = extract_tables(THREE_TABLES, &options).unwrap();
        assert_eq!(grids.len(), 3);
        assert_eq!(first_cell(&grids[1]), "2");
    }

    #[test]
    fn test_unmatched_class_is_no_tables_found() {
        let options = ExtractOptions {
            by_class: Some("infobox".to_string()),
            ..ExtractOptions::default()
        };
        let err = extract_tables(THREE_TABLES, &options).unwrap_err();
        assert!(matches!(err, Error::NoTablesFound));
    }

    #[test]
    fn test_empty_page_is_no_tables_found() {
        let err = extract_tables("<html><body><p>hi</p></body></html>", &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoTablesFound));
    }

    #[test]
    fn test_index_subset() {
        let options = ExtractOptions {
            by_class: None,
            table_indices: Some(vec![0, 2]),
            ..ExtractOptions::default()
        };
        let grids = extract_tables(THREE_TABLES, &options).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(first_cell(&grids[0]), "1");
        assert_eq!(first_cell(&grids[1]), "3");
        assert_eq!(grids[1].source_index, 2);
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        // Selecting index 5 on a 3-table page fails before any build
        let options = ExtractOptions {
            by_class: None,
            table_indices: Some(vec![5]),
            ..ExtractOptions::default()
        };
        let err = extract_tables(THREE_TABLES, &options).unwrap_err();
        match err {
            Error::InvalidTableIndex {
                indices,
                table_count,
            } => {
                assert_eq!(indices, vec![5]);
                assert_eq!(table_count, 3);
            }
            other => panic!("expected InvalidTableIndex, got {other:?}"),
        }
    }

    #[test]
    fn test_broken_table_skipped_by_default() {
        let html = "<html><body>\
            <table class=\"wikitable\"><tr><th>A</th></tr>\
            <tr><td rowspan=\"5\">deep</td></tr></table>\
            <table class=\"wikitable\"><tr><th>B</th></tr><tr><td>ok</td></tr></table>\
            </body></html>";
        let report = extract_report(html, &ExtractOptions::default()).unwrap();
        assert_eq!(report.grids.len(), 1);
        assert_eq!(first_cell(&report.grids[0]), "ok");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 0);
        assert!(report.skipped[0].reason.contains("rowspan"));
    }

    #[test]
    fn test_broken_table_fatal_when_strict() {
        let html = "<html><body>\
            <table class=\"wikitable\"><tr><th>A</th></tr>\
            <tr><td rowspan=\"5\">deep</td></tr></table>\
            </body></html>";
        let options = ExtractOptions {
            errors_ignore: false,
            ..ExtractOptions::default()
        };
        let err = extract_tables(html, &options).unwrap_err();
        assert!(matches!(err, Error::TableProcessing { index: 0, .. }));
    }

    #[test]
    fn test_rowless_table_reported() {
        let html = "<html><body><table class=\"wikitable\"></table></body></html>";
        let report = extract_report(html, &ExtractOptions::default()).unwrap();
        assert!(report.grids.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, "table has no rows");
    }

    #[test]
    fn test_raw_option_flows_through() {
        let html = "<html><body>\
            <table class=\"wikitable\"><tr><th>A</th></tr>\
            <tr><td><i>em</i></td></tr></table>\
            </body></html>";
        let options = ExtractOptions {
            raw: true,
            ..ExtractOptions::default()
        };
        let grids = extract_tables(html, &options).unwrap();
        assert_eq!(grids[0].rows[0][0], Cell::Filled("<i>em</i>".to_string()));
    }

    #[test]
    fn test_extract_file_missing_path() {
        let err = extract_file("/nonexistent/page.html", &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
