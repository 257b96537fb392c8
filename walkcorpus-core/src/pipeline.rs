//! Corpus pipeline orchestration.
//!
//! Provides the [`CorpusPipeline`] entry point, which drives walk generation,
//! pair counting, pruning, and matrix assembly in order.

use tracing::{info, instrument};

use crate::{
    Result,
    aggregate::count_pairs,
    builder::{CorpusParams, ExecutionStrategy},
    corpus::build_corpus,
    error::CorpusError,
    graph::Adjacency,
    matrix::{CooccurrenceMatrix, assemble},
    memory::{estimate_peak_bytes, format_bytes},
};

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of walks generated.
    pub walks: usize,
    /// Number of pairs emitted across every walk, duplicates included.
    pub pairs_emitted: u64,
    /// Number of distinct pairs before pruning.
    pub distinct_pairs: usize,
    /// Number of distinct pairs that survived pruning.
    pub retained_pairs: usize,
}

/// Output of [`CorpusPipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusReport {
    matrix: CooccurrenceMatrix,
    stats: CorpusStats,
}

impl CorpusReport {
    /// Returns the assembled co-occurrence matrix.
    #[must_use]
    pub fn matrix(&self) -> &CooccurrenceMatrix {
        &self.matrix
    }

    /// Returns the run counters.
    #[must_use]
    pub fn stats(&self) -> CorpusStats {
        self.stats
    }

    /// Consumes the report and returns the matrix.
    #[must_use]
    pub fn into_matrix(self) -> CooccurrenceMatrix {
        self.matrix
    }
}

/// Entry point for building a co-occurrence matrix from a graph.
///
/// # Examples
/// ```
/// use walkcorpus_core::{CorpusBuilder, Graph};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)])?;
/// let pipeline = CorpusBuilder::new().with_pruning_threshold(0).build()?;
/// let report = pipeline.run(&graph)?;
/// assert_eq!(report.matrix().shape(), (3, 3));
/// assert!(report.matrix().is_symmetric());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CorpusPipeline {
    params: CorpusParams,
    execution_strategy: ExecutionStrategy,
    max_bytes: Option<u64>,
}

impl CorpusPipeline {
    pub(crate) fn new(
        params: CorpusParams,
        execution_strategy: ExecutionStrategy,
        max_bytes: Option<u64>,
    ) -> Self {
        Self {
            params,
            execution_strategy,
            max_bytes,
        }
    }

    /// Returns the validated stage parameters.
    #[must_use]
    pub fn params(&self) -> &CorpusParams {
        &self.params
    }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the memory ceiling checked before a run, if any.
    #[must_use]
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Runs every stage against `graph`.
    ///
    /// # Errors
    /// Returns [`CorpusError::MemoryLimitExceeded`] when the estimated peak
    /// memory exceeds the configured ceiling,
    /// [`CorpusError::BackendUnavailable`] when the strategy is not compiled
    /// in, and [`CorpusError::Graph`] when the adjacency view rejects a node.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::{CorpusBuilder, CorpusError, Graph};
    ///
    /// let graph = Graph::from_edges([(0, 1)])?;
    /// let err = CorpusBuilder::new()
    ///     .with_max_bytes(Some(1))
    ///     .build()?
    ///     .run(&graph)
    ///     .expect_err("one byte is never enough");
    /// assert!(matches!(err, CorpusError::MemoryLimitExceeded { limit: 1, .. }));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            walk_length = self.params.walk_length().get(),
            number_of_walks = self.params.number_of_walks().get(),
            window_size = self.params.window_size().get(),
            pruning_threshold = self.params.pruning_threshold(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run<G>(&self, graph: &G) -> Result<CorpusReport>
    where
        G: Adjacency + Sync + ?Sized,
    {
        let node_count = graph.node_count();
        self.check_memory(node_count)?;

        let corpus = build_corpus(graph, &self.params, self.execution_strategy)?;
        let walks = corpus.len();
        let counts = count_pairs(&corpus, self.params.window_size(), self.execution_strategy)?;
        drop(corpus);

        let pairs_emitted = counts.total();
        let distinct_pairs = counts.len();
        let pruned = counts.prune(self.params.pruning_threshold());
        let retained_pairs = pruned.len();
        let matrix = assemble(pruned, node_count)?;

        let stats = CorpusStats {
            walks,
            pairs_emitted,
            distinct_pairs,
            retained_pairs,
        };
        info!(
            walks,
            pairs_emitted,
            distinct_pairs,
            retained_pairs,
            nnz = matrix.nnz(),
            "co-occurrence matrix built"
        );
        Ok(CorpusReport { matrix, stats })
    }

    fn check_memory(&self, node_count: usize) -> Result<()> {
        let Some(limit) = self.max_bytes else {
            return Ok(());
        };
        let estimated = estimate_peak_bytes(node_count, &self.params);
        if estimated > limit {
            return Err(CorpusError::MemoryLimitExceeded {
                estimated,
                limit,
                node_count,
            });
        }
        info!(
            estimated = %format_bytes(estimated),
            limit = %format_bytes(limit),
            "memory estimate within limit"
        );
        Ok(())
    }
}
