//! Walk corpus generation.
//!
//! Starts `number_of_walks` walks from every node. Walk `k` of the corpus
//! (counting repetitions first, then nodes in enumeration order) draws from a
//! generator seeded by mixing the run seed with `k`, so the sequential and
//! parallel schedules emit the same walks in the same order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    Result,
    builder::{CorpusParams, ExecutionStrategy, Schedule},
    graph::Adjacency,
    rng::walk_rng,
    walk::{Walk, sample_walk},
};

/// Every walk produced for one pipeline run.
///
/// Downstream stages treat the corpus as an unordered multiset; the stored
/// order is nevertheless stable for a given seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkCorpus {
    walks: Vec<Walk>,
}

impl WalkCorpus {
    /// Wraps pre-computed walks.
    #[must_use]
    pub fn from_walks(walks: Vec<Walk>) -> Self {
        Self { walks }
    }

    /// Returns the walks in generation order.
    #[must_use]
    pub fn walks(&self) -> &[Walk] {
        &self.walks
    }

    /// Returns the number of walks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walks.len()
    }

    /// Returns whether the corpus holds no walks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Sum of all walk lengths.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.walks.iter().map(Walk::len).sum()
    }

    /// Iterates over the walks.
    pub fn iter(&self) -> std::slice::Iter<'_, Walk> {
        self.walks.iter()
    }

    /// Consumes the corpus and returns its walks.
    #[must_use]
    pub fn into_walks(self) -> Vec<Walk> {
        self.walks
    }
}

impl<'a> IntoIterator for &'a WalkCorpus {
    type Item = &'a Walk;
    type IntoIter = std::slice::Iter<'a, Walk>;

    fn into_iter(self) -> Self::IntoIter {
        self.walks.iter()
    }
}

/// Generates the full walk corpus for `graph`.
///
/// # Errors
/// Returns [`crate::CorpusError::BackendUnavailable`] when `strategy` asks
/// for a schedule that is not compiled in, and
/// [`crate::CorpusError::Graph`] if the adjacency view reports an unknown
/// node.
///
/// # Examples
/// ```
/// use walkcorpus_core::{CorpusBuilder, ExecutionStrategy, Graph, build_corpus};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)])?;
/// let params = CorpusBuilder::new()
///     .with_walk_length(4)
///     .with_number_of_walks(3)
///     .params()?;
/// let corpus = build_corpus(&graph, &params, ExecutionStrategy::Sequential)?;
/// assert_eq!(corpus.len(), 9);
/// assert!(corpus.iter().all(|walk| walk.len() == 4));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.build_corpus",
    err,
    skip(graph, params),
    fields(
        nodes = graph.node_count(),
        walks_per_node = params.number_of_walks().get(),
        walk_length = params.walk_length().get(),
    ),
)]
pub fn build_corpus<G>(
    graph: &G,
    params: &CorpusParams,
    strategy: ExecutionStrategy,
) -> Result<WalkCorpus>
where
    G: Adjacency + Sync + ?Sized,
{
    let schedule = strategy.schedule()?;
    let nodes = graph.nodes();
    let repetitions = params.number_of_walks().get();
    let mut walks = Vec::with_capacity(nodes.len().saturating_mul(repetitions));

    for repetition in 0..repetitions {
        info!(
            run = repetition + 1,
            runs = repetitions,
            "random walk run {}/{}",
            repetition + 1,
            repetitions
        );
        let first_ordinal = repetition * nodes.len();
        match schedule {
            Schedule::Sequential => {
                for (position, &node) in nodes.iter().enumerate() {
                    walks.push(walk_at(graph, params, node, first_ordinal + position)?);
                }
            }
            #[cfg(feature = "parallel")]
            Schedule::Parallel => {
                let batch: Vec<Walk> = nodes
                    .par_iter()
                    .enumerate()
                    .map(|(position, &node)| {
                        walk_at(graph, params, node, first_ordinal + position)
                    })
                    .collect::<Result<_>>()?;
                walks.extend(batch);
            }
        }
    }

    Ok(WalkCorpus { walks })
}

fn walk_at<G>(graph: &G, params: &CorpusParams, node: usize, ordinal: usize) -> Result<Walk>
where
    G: Adjacency + ?Sized,
{
    let mut rng = walk_rng(params.seed(), ordinal);
    Ok(sample_walk(graph, node, params.walk_length(), &mut rng)?)
}
