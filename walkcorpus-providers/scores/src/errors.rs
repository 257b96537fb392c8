use thiserror::Error;
use walkcorpus_core::CorpusError;

/// Errors raised while loading a pre-scored matrix.
#[derive(Debug, Error)]
pub enum ScoredMatrixProviderError {
    /// The input held a header but no score rows.
    #[error("scored matrix input contains no rows")]
    EmptyInput,
    /// A row did not hold exactly three fields.
    #[error("line {line}: expected 3 fields but found {found}")]
    FieldCount {
        /// 1-based line number of the offending row.
        line: u64,
        /// Number of fields present on the row.
        found: usize,
    },
    /// A field could not be parsed.
    #[error("line {line}: {message}")]
    InvalidField {
        /// 1-based line number of the offending row.
        line: u64,
        /// Parser diagnostic.
        message: String,
    },
    /// A score was NaN, infinite, or too large for single precision.
    #[error("line {line}: score {score} is not finite in single precision")]
    NonFiniteScore {
        /// 1-based line number of the offending row.
        line: u64,
        /// The rejected score.
        score: f64,
    },
    /// An index implies a matrix larger than the supported dimension.
    #[error("line {line}: a {rows}x{cols} matrix exceeds the limit of {limit} rows or columns")]
    ShapeTooLarge {
        /// 1-based line number of the offending row.
        line: u64,
        /// Row count implied by the input so far.
        rows: usize,
        /// Column count implied by the input so far.
        cols: usize,
        /// Largest supported row or column count.
        limit: usize,
    },
    /// The CSV reader failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Matrix assembly failed.
    #[error("matrix error: {0}")]
    Matrix(#[from] CorpusError),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
