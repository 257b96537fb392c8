//! Benchmark parameter labels.

use std::fmt;

/// Parameters for a walk-generation or pair-counting benchmark run.
#[derive(Clone, Debug)]
pub struct WalkBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
    /// Maximum nodes per walk.
    pub walk_length: usize,
}

impl fmt::Display for WalkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},len={}", self.node_count, self.walk_length)
    }
}

/// Parameters for an end-to-end pipeline benchmark run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
    /// Scheduling label, such as `sequential` or `parallel`.
    pub strategy: &'static str,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.node_count, self.strategy)
    }
}
