//! Sparse co-occurrence matrix assembly.

use sprs::{CsMat, TriMat};
use tracing::{debug, instrument};

use crate::{Result, aggregate::PrunedFrequencies, error::CorpusError};

/// Square sparse matrix of retained co-occurrence counts.
///
/// Entry `(i, j)` holds the number of times node `j` appeared within the
/// window of node `i`; absent entries are implicit zeros. Storage is CSR so
/// iteration is row-major and independent of hash order.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    inner: CsMat<f32>,
}

impl CooccurrenceMatrix {
    /// Builds a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed.
    ///
    /// # Errors
    /// Returns [`CorpusError::EntryOutOfBounds`] when a coordinate falls
    /// outside `shape`.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::CooccurrenceMatrix;
    ///
    /// let matrix = CooccurrenceMatrix::from_triplets((2, 3), [(0, 2, 1.5), (0, 2, 0.5)])?;
    /// assert_eq!(matrix.shape(), (2, 3));
    /// assert_eq!(matrix.get(0, 2), Some(2.0));
    /// assert_eq!(matrix.nnz(), 1);
    /// # Ok::<(), walkcorpus_core::CorpusError>(())
    /// ```
    pub fn from_triplets<I>(shape: (usize, usize), triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f32)>,
    {
        let (rows, cols) = shape;
        let mut staging = TriMat::new(shape);
        for (row, col, value) in triplets {
            if row >= rows || col >= cols {
                return Err(CorpusError::EntryOutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            staging.add_triplet(row, col, value);
        }
        Ok(Self {
            inner: staging.to_csr(),
        })
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Returns the number of explicitly stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Returns the stored value at `(row, col)`, or `None` for an implicit
    /// zero or an out-of-range coordinate.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.inner.get(row, col).copied()
    }

    /// Iterates over stored entries as `(row, col, value)` in row-major
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.inner
            .iter()
            .map(|(&value, (row, col))| (row, col, value))
    }

    /// Returns whether the matrix is square and equal to its transpose.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.rows() == self.cols()
            && self
                .iter()
                .all(|(row, col, value)| self.get(col, row) == Some(value))
    }

    /// Borrows the underlying CSR matrix.
    #[must_use]
    pub fn as_csr(&self) -> &CsMat<f32> {
        &self.inner
    }

    /// Consumes the wrapper and returns the CSR matrix.
    #[must_use]
    pub fn into_csr(self) -> CsMat<f32> {
        self.inner
    }
}

/// Writes every surviving pair count into an `(N, N)` matrix.
///
/// # Errors
/// Returns [`CorpusError::EntryOutOfBounds`] when a pair references a node
/// index `>= node_count`.
///
/// # Examples
/// ```
/// use walkcorpus_core::{CooccurrencePair, FrequencyMap, assemble};
///
/// let counts: FrequencyMap = [(0, 1), (1, 0), (0, 1)]
///     .into_iter()
///     .map(CooccurrencePair::from)
///     .collect();
/// let matrix = assemble(counts.prune(0), 3)?;
/// assert_eq!(matrix.shape(), (3, 3));
/// assert_eq!(matrix.get(0, 1), Some(2.0));
/// assert_eq!(matrix.get(1, 0), Some(1.0));
/// assert_eq!(matrix.get(2, 2), None);
/// # Ok::<(), walkcorpus_core::CorpusError>(())
/// ```
#[instrument(
    name = "core.assemble",
    err,
    skip(pruned),
    fields(entries = pruned.len()),
)]
pub fn assemble(pruned: PrunedFrequencies, node_count: usize) -> Result<CooccurrenceMatrix> {
    #[expect(
        clippy::cast_precision_loss,
        reason = "matrix values are single-precision counts"
    )]
    let triplets = pruned
        .into_iter()
        .map(|(pair, count)| (pair.source, pair.target, count as f32));
    let matrix = CooccurrenceMatrix::from_triplets((node_count, node_count), triplets)?;
    debug!(nnz = matrix.nnz(), "co-occurrence matrix assembled");
    Ok(matrix)
}
