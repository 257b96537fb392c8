//! Truncated, memoryless random walks.

use std::num::NonZeroUsize;

use rand::{Rng, seq::SliceRandom};

use crate::{error::GraphError, graph::Adjacency};

/// Ordered node sequence produced by [`sample_walk`].
///
/// A walk always contains its source node and is never padded: a walk that
/// reaches a node without neighbours ends there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    source: usize,
    nodes: Vec<usize>,
}

impl Walk {
    /// Wraps a pre-recorded node sequence.
    ///
    /// Returns `None` for an empty sequence, since every walk holds its
    /// source.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::Walk;
    ///
    /// let walk = Walk::from_nodes(vec![3, 1, 3]).expect("sequence is non-empty");
    /// assert_eq!(walk.source(), 3);
    /// assert!(Walk::from_nodes(Vec::new()).is_none());
    /// ```
    #[must_use]
    pub fn from_nodes(nodes: Vec<usize>) -> Option<Self> {
        let source = nodes.first().copied()?;
        Some(Self { source, nodes })
    }

    /// Returns the visited nodes in order.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Returns the node the walk started from.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the number of visited nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a walk contains at least its source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consumes the walk and returns the visited nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}

impl AsRef<[usize]> for Walk {
    fn as_ref(&self) -> &[usize] {
        &self.nodes
    }
}

/// Samples one truncated random walk starting at `source`.
///
/// Each step draws a neighbour of the current node uniformly and
/// independently of the path so far. The walk stops once it holds
/// `walk_length` nodes or reaches a node without neighbours.
///
/// # Errors
/// Returns [`GraphError::UnknownNode`] when `source` is not part of `graph`.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use rand::{SeedableRng, rngs::SmallRng};
/// use walkcorpus_core::{Graph, sample_walk};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)])?;
/// let length = NonZeroUsize::new(5).expect("length is non-zero");
/// let mut rng = SmallRng::seed_from_u64(7);
/// let walk = sample_walk(&graph, 0, length, &mut rng)?;
/// assert_eq!(walk.source(), 0);
/// assert_eq!(walk.len(), 5);
/// # Ok::<(), walkcorpus_core::GraphError>(())
/// ```
pub fn sample_walk<G, R>(
    graph: &G,
    source: usize,
    walk_length: NonZeroUsize,
    rng: &mut R,
) -> Result<Walk, GraphError>
where
    G: Adjacency + ?Sized,
    R: Rng + ?Sized,
{
    let limit = walk_length.get();
    let mut nodes = Vec::with_capacity(limit);
    nodes.push(source);
    let mut current = source;
    // Validate the source even for single-node walks.
    let mut neighbours = graph.neighbours(current)?;
    while nodes.len() < limit {
        let Some(&next) = neighbours.choose(rng) else {
            break;
        };
        nodes.push(next);
        current = next;
        neighbours = graph.neighbours(current)?;
    }
    Ok(Walk { source, nodes })
}
