//! Pre-scored matrix provider implementation.
use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};
use walkcorpus_core::CooccurrenceMatrix;

use crate::errors::ScoredMatrixProviderError;

const SCORE_FIELDS: usize = 3;

/// Largest row or column count a scored matrix may have.
///
/// The CSR row pointer holds `rows + 1` offsets, so an unbounded index in the
/// input would translate directly into an allocation of that size.
pub const MAX_DIMENSION: usize = 1 << 26;

#[derive(Debug, Deserialize)]
struct ScoreRecord {
    row: usize,
    col: usize,
    score: f64,
}

/// Sparse matrix loaded from `(row_id, col_id, score)` rows.
///
/// Duplicate coordinates are summed.
///
/// # Examples
/// ```
/// use walkcorpus_providers_scores::ScoredMatrixProvider;
///
/// let csv = "row,col,score\n0,2,1.5\n1,0,0.5\n0,2,1.0\n";
/// let provider = ScoredMatrixProvider::try_from_reader("demo", csv.as_bytes())?;
/// assert_eq!(provider.matrix().shape(), (2, 3));
/// assert_eq!(provider.matrix().get(0, 2), Some(2.5));
/// assert_eq!(provider.score_rows(), 3);
/// # Ok::<(), walkcorpus_providers_scores::ScoredMatrixProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScoredMatrixProvider {
    name: String,
    matrix: CooccurrenceMatrix,
    score_rows: usize,
}

impl ScoredMatrixProvider {
    /// Loads scores from any reader.
    ///
    /// # Errors
    /// Returns [`ScoredMatrixProviderError::EmptyInput`] when there are no
    /// rows, [`ScoredMatrixProviderError::FieldCount`] or
    /// [`ScoredMatrixProviderError::InvalidField`] for malformed rows,
    /// [`ScoredMatrixProviderError::NonFiniteScore`] for scores that are NaN,
    /// infinite, or overflow single precision,
    /// [`ScoredMatrixProviderError::ShapeTooLarge`] when an index implies more
    /// than [`MAX_DIMENSION`] rows or columns, and
    /// [`ScoredMatrixProviderError::Csv`] when the reader fails.
    #[instrument(
        name = "providers.scores.load",
        err,
        skip(name, reader),
        fields(name = tracing::field::Empty),
    )]
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, ScoredMatrixProviderError> {
        let name = name.into();
        tracing::Span::current().record("name", name.as_str());

        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut triplets = Vec::new();
        let mut shape = (0_usize, 0_usize);
        for row in csv.records() {
            let record = row?;
            let line = record.position().map_or(0, csv::Position::line);
            if record.len() != SCORE_FIELDS {
                return Err(ScoredMatrixProviderError::FieldCount {
                    line,
                    found: record.len(),
                });
            }
            let entry: ScoreRecord =
                record
                    .deserialize(None)
                    .map_err(|err| ScoredMatrixProviderError::InvalidField {
                        line,
                        message: err.to_string(),
                    })?;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "matrix values are stored in single precision"
            )]
            let score = entry.score as f32;
            if !score.is_finite() {
                return Err(ScoredMatrixProviderError::NonFiniteScore {
                    line,
                    score: entry.score,
                });
            }
            let rows = shape.0.max(entry.row.saturating_add(1));
            let cols = shape.1.max(entry.col.saturating_add(1));
            if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
                return Err(ScoredMatrixProviderError::ShapeTooLarge {
                    line,
                    rows,
                    cols,
                    limit: MAX_DIMENSION,
                });
            }
            shape = (rows, cols);
            triplets.push((entry.row, entry.col, score));
        }

        if triplets.is_empty() {
            return Err(ScoredMatrixProviderError::EmptyInput);
        }
        let score_rows = triplets.len();
        let matrix = CooccurrenceMatrix::from_triplets(shape, triplets)?;
        debug!(
            rows = score_rows,
            shape = ?matrix.shape(),
            nnz = matrix.nnz(),
            "scored matrix loaded"
        );
        Ok(Self {
            name,
            matrix,
            score_rows,
        })
    }

    /// Loads scores from a file on disk.
    ///
    /// # Errors
    /// Returns [`ScoredMatrixProviderError::Io`] when the file cannot be
    /// opened, plus every error of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ScoredMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, file)
    }

    /// Returns the data source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded matrix.
    #[must_use]
    pub fn matrix(&self) -> &CooccurrenceMatrix {
        &self.matrix
    }

    /// Consumes the provider and returns the matrix.
    #[must_use]
    pub fn into_matrix(self) -> CooccurrenceMatrix {
        self.matrix
    }

    /// Number of score rows read, duplicates included.
    #[must_use]
    pub fn score_rows(&self) -> usize {
        self.score_rows
    }
}
