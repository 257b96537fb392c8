//! Error types for the walkcorpus core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building or querying a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The edge list contained no edges, so no node can exist.
    #[error("edge list contains no edges")]
    EmptyEdgeList,
    /// Node identifiers do not cover `0..node_count` densely.
    #[error(
        "node ids must be dense in 0..{node_count}, but the largest id observed is {max_id}"
    )]
    NonContiguousNodeIds {
        /// Largest node identifier present in the edge list.
        max_id: usize,
        /// Number of distinct nodes present in the edge list.
        node_count: usize,
    },
    /// A lookup referenced a node that is not part of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode {
        /// The node identifier that was requested.
        node: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The edge list contained no edges.
        EmptyEdgeList => EmptyEdgeList => "GRAPH_EMPTY_EDGE_LIST",
        /// Node identifiers were not dense.
        NonContiguousNodeIds => NonContiguousNodeIds { .. } => "GRAPH_NON_CONTIGUOUS_NODE_IDS",
        /// A lookup referenced an unknown node.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
    }
}

/// Error type produced when configuring or running a [`crate::CorpusPipeline`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CorpusError {
    /// Walk length must be greater than zero.
    #[error("walk_length must be at least 1 (got {got})")]
    InvalidWalkLength {
        /// The invalid walk length supplied by the caller.
        got: usize,
    },
    /// Number of walks per node must be greater than zero.
    #[error("number_of_walks must be at least 1 (got {got})")]
    InvalidNumberOfWalks {
        /// The invalid repetition count supplied by the caller.
        got: usize,
    },
    /// Window size must be greater than zero.
    #[error("window_size must be at least 1 (got {got})")]
    InvalidWindowSize {
        /// The invalid window size supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The estimated peak memory exceeds the configured ceiling.
    #[error(
        "estimated peak memory {estimated} bytes for {node_count} nodes exceeds the limit of {limit} bytes"
    )]
    MemoryLimitExceeded {
        /// Estimated peak memory for the run.
        estimated: u64,
        /// Ceiling configured by the caller.
        limit: u64,
        /// Number of nodes in the graph that triggered the check.
        node_count: usize,
    },
    /// A frequency entry does not fit inside the requested matrix shape.
    #[error("entry ({row}, {col}) lies outside a {rows}x{cols} matrix")]
    EntryOutOfBounds {
        /// Row coordinate of the offending entry.
        row: usize,
        /// Column coordinate of the offending entry.
        col: usize,
        /// Number of rows in the target matrix.
        rows: usize,
        /// Number of columns in the target matrix.
        cols: usize,
    },
    /// A graph operation failed while running the pipeline.
    #[error("graph operation failed: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`CorpusError`] variants.
    enum CorpusErrorCode for CorpusError {
        /// Walk length must be greater than zero.
        InvalidWalkLength => InvalidWalkLength { .. } => "CORPUS_INVALID_WALK_LENGTH",
        /// Number of walks per node must be greater than zero.
        InvalidNumberOfWalks => InvalidNumberOfWalks { .. } => "CORPUS_INVALID_NUMBER_OF_WALKS",
        /// Window size must be greater than zero.
        InvalidWindowSize => InvalidWindowSize { .. } => "CORPUS_INVALID_WINDOW_SIZE",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "CORPUS_BACKEND_UNAVAILABLE",
        /// The estimated peak memory exceeds the configured ceiling.
        MemoryLimitExceeded => MemoryLimitExceeded { .. } => "CORPUS_MEMORY_LIMIT_EXCEEDED",
        /// A frequency entry does not fit inside the matrix shape.
        EntryOutOfBounds => EntryOutOfBounds { .. } => "CORPUS_ENTRY_OUT_OF_BOUNDS",
        /// A graph operation failed.
        GraphFailure => Graph(..) => "CORPUS_GRAPH_FAILURE",
    }
}

impl CorpusError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the graph store.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Errors raised by [`crate::sample_weighted`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplingError {
    /// The cumulative weight never reached the uniform draw.
    #[error("weights sum to {total}, which never reached the draw {draw}")]
    WeightsExhausted {
        /// Sum of all weights supplied.
        total: f64,
        /// Uniform draw in `[0, 1)` that was not covered.
        draw: f64,
    },
    /// A weight was negative, NaN, or infinite.
    #[error("weight at position {position} is not a finite non-negative number: {weight}")]
    InvalidWeight {
        /// Zero-based position of the weight in iteration order.
        position: usize,
        /// The rejected weight.
        weight: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplingError`] variants.
    enum SamplingErrorCode for SamplingError {
        /// The cumulative weight never reached the uniform draw.
        WeightsExhausted => WeightsExhausted { .. } => "SAMPLING_WEIGHTS_EXHAUSTED",
        /// A weight was negative or non-finite.
        InvalidWeight => InvalidWeight { .. } => "SAMPLING_INVALID_WEIGHT",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CorpusError>;
