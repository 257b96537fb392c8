//! Walk generation and pair counting benchmarks.
//!
//! Measures the two hot stages of the pipeline in isolation: sampling the
//! walk corpus, then folding it into a co-occurrence frequency map.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use walkcorpus_benches::{
    error::BenchSetupError,
    params::WalkBenchParams,
    source::{SyntheticGraphConfig, ring_with_chords},
};
use walkcorpus_core::{CorpusBuilder, ExecutionStrategy, build_corpus, count_pairs};

const SEED: u64 = 42;
const CHORDS_PER_NODE: usize = 2;
const NODE_COUNTS: &[usize] = &[100, 1_000, 5_000];
const WALK_LENGTHS: &[usize] = &[20, 80];
const WINDOW_SIZE: usize = 3;

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn build_corpus_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("build_corpus");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let graph = ring_with_chords(&SyntheticGraphConfig {
            node_count,
            chords_per_node: CHORDS_PER_NODE,
            seed: SEED,
        })?;

        for &walk_length in WALK_LENGTHS {
            let params = CorpusBuilder::new()
                .with_walk_length(walk_length)
                .with_seed(SEED)
                .params()?;
            group.bench_with_input(
                BenchmarkId::from_parameter(WalkBenchParams {
                    node_count,
                    walk_length,
                }),
                &params,
                |b, walk_params| {
                    b.iter(|| {
                        if let Err(err) =
                            build_corpus(&graph, walk_params, ExecutionStrategy::Sequential)
                        {
                            panic!("build_corpus failed during benchmark: {err}");
                        }
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn count_pairs_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("count_pairs");
    group.sample_size(20);

    let window = NonZeroUsize::new(WINDOW_SIZE).ok_or(BenchSetupError::ZeroValue {
        context: "window_size",
    })?;

    for &node_count in NODE_COUNTS {
        let graph = ring_with_chords(&SyntheticGraphConfig {
            node_count,
            chords_per_node: CHORDS_PER_NODE,
            seed: SEED,
        })?;

        for &walk_length in WALK_LENGTHS {
            let params = CorpusBuilder::new()
                .with_walk_length(walk_length)
                .with_seed(SEED)
                .params()?;
            let corpus = build_corpus(&graph, &params, ExecutionStrategy::Sequential)?;
            group.bench_with_input(
                BenchmarkId::from_parameter(WalkBenchParams {
                    node_count,
                    walk_length,
                }),
                &corpus,
                |b, walks| {
                    b.iter(|| {
                        if let Err(err) = count_pairs(walks, window, ExecutionStrategy::Sequential)
                        {
                            panic!("count_pairs failed during benchmark: {err}");
                        }
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn walk_stages(c: &mut Criterion) {
    if let Err(err) = build_corpus_impl(c) {
        panic!("build_corpus benchmark setup failed: {err}");
    }
    if let Err(err) = count_pairs_impl(c) {
        panic!("count_pairs benchmark setup failed: {err}");
    }
}

criterion_group!(benches, walk_stages);
criterion_main!(benches);
