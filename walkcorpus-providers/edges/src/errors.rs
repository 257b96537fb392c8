use thiserror::Error;
use walkcorpus_core::GraphError;

/// Errors raised while loading an edge list.
#[derive(Debug, Error)]
pub enum EdgeListProviderError {
    /// A row did not hold exactly two fields.
    #[error("line {line}: expected 2 fields but found {found}")]
    FieldCount {
        /// 1-based line number of the offending row.
        line: u64,
        /// Number of fields present on the row.
        found: usize,
    },
    /// A field could not be parsed as a node identifier.
    #[error("line {line}: {message}")]
    InvalidNodeId {
        /// 1-based line number of the offending row.
        line: u64,
        /// Parser diagnostic.
        message: String,
    },
    /// The CSV reader failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// The edge list was read but does not describe a usable graph.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
