//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` before Criterion takes over.

use crate::source::SyntheticGraphError;
use walkcorpus_core::CorpusError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticGraphError),
    /// Parameter validation or corpus construction failed.
    #[error("corpus operation failed: {0}")]
    Corpus(#[from] CorpusError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
}
