//! Synthetic graph generators for benchmarking.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use walkcorpus_core::{Graph, GraphError};

/// Configuration for a ring graph with random chords.
///
/// The ring keeps node identifiers dense and every node reachable; the chords
/// give walks a branching choice at most steps.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes on the ring.
    pub node_count: usize,
    /// Random chords added per node.
    pub chords_per_node: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Errors raised while generating a synthetic graph.
#[derive(Debug, Error)]
pub enum SyntheticGraphError {
    /// Fewer than three nodes cannot form a simple ring.
    #[error("a synthetic ring needs at least 3 nodes, got {got}")]
    TooFewNodes {
        /// Requested node count.
        got: usize,
    },
    /// The generated edges were rejected by the graph store.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Generates a ring of `node_count` nodes plus seeded random chords.
///
/// # Errors
/// Returns [`SyntheticGraphError::TooFewNodes`] when `node_count < 3`.
pub fn ring_with_chords(config: &SyntheticGraphConfig) -> Result<Graph, SyntheticGraphError> {
    let node_count = config.node_count;
    if node_count < 3 {
        return Err(SyntheticGraphError::TooFewNodes { got: node_count });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let ring = (0..node_count).zip((1..node_count).chain([0]));
    let chord_count = node_count.saturating_mul(config.chords_per_node);
    let chords: Vec<(usize, usize)> = (0..chord_count)
        .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
        .filter(|(a, b)| a != b)
        .collect();

    Ok(Graph::from_edges(ring.chain(chords))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::bare_ring(8, 0)]
    #[case::chorded(64, 3)]
    fn generated_graph_covers_every_node(#[case] node_count: usize, #[case] chords: usize) {
        let graph = ring_with_chords(&SyntheticGraphConfig {
            node_count,
            chords_per_node: chords,
            seed: 5,
        })
        .expect("generation must succeed");
        assert_eq!(graph.node_count(), node_count);
        assert!(graph.edge_count() >= node_count);
    }

    #[rstest]
    fn same_seed_yields_same_graph() {
        let config = SyntheticGraphConfig {
            node_count: 32,
            chords_per_node: 2,
            seed: 9,
        };
        let first = ring_with_chords(&config).expect("generation must succeed");
        let second = ring_with_chords(&config).expect("generation must succeed");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    fn tiny_rings_are_rejected(#[case] node_count: usize) {
        let err = ring_with_chords(&SyntheticGraphConfig {
            node_count,
            chords_per_node: 1,
            seed: 1,
        })
        .expect_err("rings below three nodes must fail");
        assert!(matches!(err, SyntheticGraphError::TooFewNodes { got } if got == node_count));
    }
}
