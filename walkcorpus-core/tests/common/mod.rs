use walkcorpus_core::Graph;

/// Edges of the three-node cycle `0 - 1 - 2 - 0`.
pub const TRIANGLE: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];

#[must_use]
pub fn triangle() -> Graph {
    Graph::from_edges(TRIANGLE).expect("triangle must build")
}

/// Triangle with node 3 hanging off node 0 by a single edge.
#[must_use]
pub fn triangle_with_leaf() -> Graph {
    Graph::from_edges(TRIANGLE.into_iter().chain([(3, 0)])).expect("graph must build")
}

/// Triangle plus a disconnected edge `3 - 4` and a self-loop on 5.
#[must_use]
pub fn triangle_with_islands() -> Graph {
    Graph::from_edges(TRIANGLE.into_iter().chain([(3, 4), (5, 5)])).expect("graph must build")
}
