//! Source-side table model lifted out of a parsed HTML document
//!
//! The builder never touches the DOM directly; it only needs a table's
//! rows, each row's direct child cells, and per cell the span attributes,
//! the joined text and the raw inner markup. This module extracts exactly
//! that from `scraper` element trees.

use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Whether a cell came from a `<th>` or a `<td>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `<th>`
    Header,
    /// `<td>`
    Data,
}

/// One `<td>`/`<th>` element, reduced to what grid building needs
#[derive(Debug, Clone)]
pub struct SourceCell {
    /// Element kind (`<th>` vs `<td>`)
    pub kind: CellKind,
    /// All descendant text nodes joined with single spaces,
    /// NFKD-normalized and trimmed
    pub text: String,
    /// Raw inner markup, unprocessed
    pub html: String,
    /// Declared column span; 1 when absent, non-numeric or zero
    pub colspan: usize,
    /// Declared row span; 1 when absent, non-numeric or zero
    pub rowspan: usize,
}

impl SourceCell {
    fn from_element(el: ElementRef<'_>) -> Self {
        let kind = if el.value().name() == "th" {
            CellKind::Header
        } else {
            CellKind::Data
        };
        SourceCell {
            kind,
            text: cell_text(el),
            html: el.inner_html(),
            colspan: span_attr(el, "colspan"),
            rowspan: span_attr(el, "rowspan"),
        }
    }
}

/// Ordered direct child cells of one `<tr>`
#[derive(Debug, Clone)]
pub struct SourceRow {
    /// All direct `<td>`/`<th>` children, in source order
    pub cells: Vec<SourceCell>,
}

impl SourceRow {
    fn from_element(el: ElementRef<'_>) -> Self {
        let cells = el
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|e| matches!(e.value().name(), "td" | "th"))
            .map(SourceCell::from_element)
            .collect();
        SourceRow { cells }
    }

    /// Logical width of this row: the sum of its cells' column spans
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }

    /// Cells that carry body values: the `<td>` children, or the `<th>`
    /// children when the row has no `<td>` at all
    pub fn data_cells(&self) -> Vec<&SourceCell> {
        let data: Vec<&SourceCell> = self
            .cells
            .iter()
            .filter(|c| c.kind == CellKind::Data)
            .collect();
        if !data.is_empty() {
            return data;
        }
        self.cells
            .iter()
            .filter(|c| c.kind == CellKind::Header)
            .collect()
    }
}

/// One `<table>` element's rows, plus its position on the page
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Position within the selected table set on the page
    pub index: usize,
    /// Rows in source order
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    /// Lift a `<table>` element into the source model.
    ///
    /// Rows are the table's direct `<tr>` children plus the `<tr>`
    /// children of its direct `<thead>`/`<tbody>`/`<tfoot>` sections
    /// (HTML5 parsers insert an implicit `<tbody>`). Rows belonging to
    /// nested tables are not picked up.
    pub fn from_element(el: ElementRef<'_>, index: usize) -> Self {
        let mut rows = Vec::new();
        for child in el.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "tr" => rows.push(SourceRow::from_element(child)),
                "thead" | "tbody" | "tfoot" => {
                    for tr in child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|e| e.value().name() == "tr")
                    {
                        rows.push(SourceRow::from_element(tr));
                    }
                }
                _ => {}
            }
        }
        SourceTable { index, rows }
    }

    /// Get the number of rows (header row included)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse a span attribute, falling back to 1 when it is absent,
/// non-numeric or zero
fn span_attr(el: ElementRef<'_>, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Join all descendant text nodes with single spaces, apply NFKD
/// normalization and trim surrounding whitespace
fn cell_text(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    joined.nfkd().collect::<String>().trim().to_string()
}
