//! Error types for wikigrid-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wikigrid-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read an HTML file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selection predicate matched zero tables
    #[error("no tables found on the page")]
    NoTablesFound,

    /// Requested table positions do not intersect the selected tables
    #[error("table indices {indices:?} match none of the {table_count} table(s) on the page")]
    InvalidTableIndex {
        indices: Vec<usize>,
        table_count: usize,
    },

    /// A single table could not be turned into a grid
    #[error("failed to process table {index}: {message}")]
    TableProcessing { index: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
