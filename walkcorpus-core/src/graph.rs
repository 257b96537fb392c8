//! In-memory undirected graph built from an edge list.
//!
//! Neighbour lists are stored in a compressed sparse row layout so the walk
//! sampler can borrow a contiguous slice per step instead of materialising a
//! set. The graph is immutable after construction and safe to share between
//! walk workers.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::GraphError;

/// Read-only neighbourhood view consumed by the walk sampler and corpus
/// builder.
///
/// # Examples
/// ```
/// use walkcorpus_core::{Adjacency, Graph};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2)])?;
/// assert_eq!(graph.nodes(), &[0, 1, 2]);
/// assert_eq!(graph.neighbours(1)?, &[0, 2]);
/// # Ok::<(), walkcorpus_core::GraphError>(())
/// ```
pub trait Adjacency {
    /// Returns the node identifiers in enumeration order.
    ///
    /// The order must be stable for the lifetime of the value.
    fn nodes(&self) -> &[usize];

    /// Returns the neighbours of `node`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `node` is not part of the graph.
    fn neighbours(&self, node: usize) -> Result<&[usize], GraphError>;

    /// Returns the number of distinct nodes.
    #[must_use]
    fn node_count(&self) -> usize {
        self.nodes().len()
    }
}

/// Undirected, unweighted graph with dense node identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    order: Vec<usize>,
    offsets: Vec<usize>,
    targets: Vec<usize>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph from `(node, node)` edge tuples.
    ///
    /// Nodes are enumerated in order of first appearance. Repeated edges
    /// collapse into one and a self-loop makes a node its own neighbour.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyEdgeList`] when no edges are supplied and
    /// [`GraphError::NonContiguousNodeIds`] when the node identifiers do not
    /// cover `0..node_count`.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::{Graph, GraphError};
    ///
    /// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)])?;
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 3);
    ///
    /// let err = Graph::from_edges([(0, 5)]).expect_err("ids must be dense");
    /// assert!(matches!(err, GraphError::NonContiguousNodeIds { max_id: 5, node_count: 2 }));
    /// # Ok::<(), GraphError>(())
    /// ```
    #[instrument(name = "core.graph.from_edges", err, skip(edges))]
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let edges: Vec<(usize, usize)> = edges.into_iter().collect();
        if edges.is_empty() {
            return Err(GraphError::EmptyEdgeList);
        }

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut max_id = 0_usize;
        for &(left, right) in &edges {
            for node in [left, right] {
                if seen.insert(node) {
                    order.push(node);
                    max_id = max_id.max(node);
                }
            }
        }

        let node_count = order.len();
        if max_id >= node_count {
            return Err(GraphError::NonContiguousNodeIds { max_id, node_count });
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for &(left, right) in &edges {
            adjacency[left].push(right);
            if left != right {
                adjacency[right].push(left);
            }
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut degree_sum = 0_usize;
        let mut self_loops = 0_usize;
        offsets.push(0);
        for (node, neighbours) in adjacency.iter_mut().enumerate() {
            neighbours.sort_unstable();
            neighbours.dedup();
            if neighbours.binary_search(&node).is_ok() {
                self_loops += 1;
            }
            degree_sum += neighbours.len();
            targets.extend_from_slice(neighbours);
            offsets.push(targets.len());
        }
        let edge_count = (degree_sum - self_loops) / 2 + self_loops;

        debug!(nodes = node_count, edges = edge_count, "graph constructed");
        Ok(Self {
            order,
            offsets,
            targets,
            edge_count,
        })
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the number of distinct undirected edges, counting each
    /// self-loop once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the number of neighbours of `node`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `node` is not part of the graph.
    pub fn degree(&self, node: usize) -> Result<usize, GraphError> {
        self.neighbours(node).map(<[usize]>::len)
    }

    /// Returns whether `left` and `right` share an edge.
    #[must_use]
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.neighbours(left)
            .is_ok_and(|neighbours| neighbours.binary_search(&right).is_ok())
    }
}

impl Adjacency for Graph {
    fn nodes(&self) -> &[usize] {
        &self.order
    }

    fn neighbours(&self, node: usize) -> Result<&[usize], GraphError> {
        let start = self.offsets.get(node).copied();
        let end = node.checked_add(1).and_then(|next| self.offsets.get(next)).copied();
        match (start, end) {
            (Some(start), Some(end)) => Ok(&self.targets[start..end]),
            _ => Err(GraphError::UnknownNode { node }),
        }
    }
}
