//! Walk corpus core library.
//!
//! Turns an unweighted graph into a sparse node-by-node co-occurrence matrix
//! by sampling truncated random walks, counting windowed node pairs, pruning
//! rare pairs, and assembling the survivors into a CSR matrix.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod builder;
mod corpus;
mod error;
mod graph;
mod matrix;
mod memory;
mod pairs;
mod pipeline;
mod rng;
mod sampling;
mod walk;

pub use crate::{
    aggregate::{FrequencyMap, PrunedFrequencies, count_pairs},
    builder::{CorpusBuilder, CorpusParams, ExecutionStrategy},
    corpus::{WalkCorpus, build_corpus},
    error::{
        CorpusError, CorpusErrorCode, GraphError, GraphErrorCode, Result, SamplingError,
        SamplingErrorCode,
    },
    graph::{Adjacency, Graph},
    matrix::{CooccurrenceMatrix, assemble},
    memory::{estimate_peak_bytes, format_bytes},
    pairs::{CooccurrencePair, extract_pairs, for_each_pair, pair_count},
    pipeline::{CorpusPipeline, CorpusReport, CorpusStats},
    sampling::sample_weighted,
    walk::{Walk, sample_walk},
};
