//! Pre-scored provider that loads `(row, col, score)` CSV triplets into a
//! [`walkcorpus_core::CooccurrenceMatrix`].
//!
//! The matrix shape is `(max row + 1, max col + 1)`, derived from the data
//! itself. This differs from the walk pipeline, whose matrices are always
//! `(N, N)` for the graph's node count, so the two outputs are only
//! interchangeable when the labels line up.

mod errors;
mod provider;

pub use errors::ScoredMatrixProviderError;
pub use provider::{MAX_DIMENSION, ScoredMatrixProvider};

#[cfg(test)]
mod tests;
