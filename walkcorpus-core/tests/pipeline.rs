//! End-to-end tests for the `CorpusPipeline` orchestration API.

mod common;

use common::{triangle, triangle_with_islands, triangle_with_leaf};
use rstest::{fixture, rstest};
use tracing::Level;
use walkcorpus_core::{
    CorpusBuilder, CorpusError, CorpusErrorCode, CorpusPipeline, ExecutionStrategy, Graph,
};
use walkcorpus_test_support::tracing::RecordingLayer;

#[fixture]
fn small_run() -> CorpusBuilder {
    CorpusBuilder::new()
        .with_walk_length(5)
        .with_number_of_walks(20)
        .with_window_size(1)
}

fn build(builder: CorpusBuilder) -> CorpusPipeline {
    builder.build().expect("configuration must be valid")
}

#[rstest]
fn builder_defaults() {
    let builder = CorpusBuilder::new();
    assert_eq!(builder.walk_length(), 80);
    assert_eq!(builder.number_of_walks(), 10);
    assert_eq!(builder.window_size(), 3);
    assert_eq!(builder.pruning_threshold(), 10);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    assert_eq!(builder.max_bytes(), None);

    let pipeline = build(builder);
    assert_eq!(pipeline.params().walk_length().get(), 80);
    assert_eq!(pipeline.execution_strategy(), ExecutionStrategy::Auto);
}

#[rstest]
#[case::walk_length(CorpusBuilder::new().with_walk_length(0), CorpusErrorCode::InvalidWalkLength)]
#[case::number_of_walks(
    CorpusBuilder::new().with_number_of_walks(0),
    CorpusErrorCode::InvalidNumberOfWalks
)]
#[case::window_size(CorpusBuilder::new().with_window_size(0), CorpusErrorCode::InvalidWindowSize)]
fn builder_rejects_zero_parameters(#[case] builder: CorpusBuilder, #[case] code: CorpusErrorCode) {
    let err = builder.build().expect_err("zero parameters must be rejected");
    assert_eq!(err.code(), code);
}

#[rstest]
fn triangle_without_pruning_is_dense_off_diagonal(small_run: CorpusBuilder) {
    let report = build(small_run.with_pruning_threshold(0))
        .run(&triangle())
        .expect("run must succeed");
    let matrix = report.matrix();

    assert_eq!(matrix.shape(), (3, 3));
    assert!(matrix.is_symmetric());
    for row in 0..3 {
        for col in (0..3).filter(|&col| col != row) {
            let value = matrix.get(row, col).unwrap_or_default();
            assert!(value > 0.0, "entry ({row}, {col}) must be positive");
        }
        assert!(matrix.iter().any(|(r, _, _)| r == row), "row {row} is empty");
    }
    // Window 1 on a loop-free graph never pairs a node with itself.
    assert!((0..3).all(|node| matrix.get(node, node).is_none()));
}

#[rstest]
fn triangle_with_unreachable_threshold_is_empty(small_run: CorpusBuilder) {
    let layer = RecordingLayer::default();
    let pipeline = build(small_run.with_pruning_threshold(1000));
    let report = layer
        .capture(|| pipeline.run(&triangle()))
        .expect("over-pruning is not an error");

    assert_eq!(report.matrix().shape(), (3, 3));
    assert_eq!(report.matrix().nnz(), 0);
    assert_eq!(report.stats().retained_pairs, 0);
    assert!(report.stats().distinct_pairs > 0);

    let warnings = layer.events_at(Level::WARN);
    assert!(warnings.iter().any(|event| {
        event.message() == Some("pruning threshold removed every co-occurrence pair")
            && event.field("threshold") == Some("1000")
    }));
}

#[rstest]
#[case(0)]
#[case(10)]
#[case(1_000_000)]
fn leaf_graph_has_four_by_four_shape(#[case] threshold: u64) {
    let report = build(CorpusBuilder::new().with_pruning_threshold(threshold))
        .run(&triangle_with_leaf())
        .expect("run must succeed");
    assert_eq!(report.matrix().shape(), (4, 4));
}

#[rstest]
fn components_never_co_occur() {
    let report = build(CorpusBuilder::new().with_pruning_threshold(0))
        .run(&triangle_with_islands())
        .expect("run must succeed");
    let matrix = report.matrix();
    assert_eq!(matrix.shape(), (6, 6));
    let component = |node: usize| match node {
        0..=2 => 0,
        3 | 4 => 1,
        _ => 2,
    };
    assert!(
        matrix
            .iter()
            .all(|(row, col, _)| component(row) == component(col))
    );
    // The self-loop keeps walks from node 5 on node 5.
    assert!(matrix.get(5, 5).is_some_and(|value| value > 0.0));
}

#[rstest]
fn raising_the_threshold_never_adds_entries() {
    let graph = Graph::from_edges((0..12).map(|node| (node, (node + 1) % 12)).chain([(0, 6)]))
        .expect("graph must build");
    let base = CorpusBuilder::new()
        .with_walk_length(20)
        .with_number_of_walks(4)
        .with_seed(17);
    let mut previous = usize::MAX;
    for threshold in [0, 1, 5, 20, 100, 10_000] {
        let nnz = build(base.clone().with_pruning_threshold(threshold))
            .run(&graph)
            .expect("run must succeed")
            .matrix()
            .nnz();
        assert!(nnz <= previous, "threshold {threshold} grew nnz to {nnz}");
        previous = nnz;
    }
}

#[rstest]
fn same_seed_reproduces_the_matrix() {
    let graph = triangle_with_leaf();
    let pipeline = build(CorpusBuilder::new().with_pruning_threshold(0).with_seed(3));
    let first = pipeline.run(&graph).expect("run must succeed");
    let second = pipeline.run(&graph).expect("run must succeed");
    assert_eq!(first, second);
}

#[cfg(feature = "parallel")]
#[rstest]
fn parallel_and_sequential_runs_agree() {
    let graph = Graph::from_edges(
        (0..30).flat_map(|node| [(node, (node + 1) % 30), (node, (node * 7) % 30)]),
    )
    .expect("graph must build");
    let base = CorpusBuilder::new().with_pruning_threshold(2).with_seed(99);
    let sequential = build(base.clone().with_execution_strategy(ExecutionStrategy::Sequential))
        .run(&graph)
        .expect("sequential run must succeed");
    let parallel = build(base.with_execution_strategy(ExecutionStrategy::Parallel))
        .run(&graph)
        .expect("parallel run must succeed");
    assert_eq!(sequential, parallel);
}

#[rstest]
fn memory_limit_is_checked_before_walking() {
    let layer = RecordingLayer::default();
    let pipeline = build(CorpusBuilder::new().with_max_bytes(Some(64)));
    let err = layer
        .capture(|| pipeline.run(&triangle()))
        .expect_err("64 bytes is below any estimate");
    assert!(matches!(
        err,
        CorpusError::MemoryLimitExceeded {
            limit: 64,
            node_count: 3,
            ..
        }
    ));
    assert!(layer.span_named("core.build_corpus").is_none());
}

#[rstest]
fn run_records_stage_spans() {
    let layer = RecordingLayer::default();
    let pipeline = build(
        CorpusBuilder::new()
            .with_walk_length(7)
            .with_number_of_walks(2)
            .with_execution_strategy(ExecutionStrategy::Sequential),
    );
    layer
        .capture(|| pipeline.run(&triangle()))
        .expect("run must succeed");

    let run = layer.span_named("core.run").expect("core.run span must exist");
    assert_eq!(run.field("nodes"), Some("3"));
    assert_eq!(run.field("walk_length"), Some("7"));
    assert_eq!(run.field("number_of_walks"), Some("2"));
    assert_eq!(run.field("strategy"), Some("Sequential"));

    for stage in ["core.build_corpus", "core.count_pairs", "core.assemble"] {
        assert!(layer.span_named(stage).is_some(), "{stage} span must exist");
    }

    let corpus = layer
        .span_named("core.build_corpus")
        .expect("core.build_corpus span must exist");
    assert_eq!(corpus.field("walks_per_node"), Some("2"));

    assert!(layer.event_with_message("random walk run 1/2").is_some());
    assert!(layer.event_with_message("random walk run 2/2").is_some());
    let built = layer
        .event_with_message("co-occurrence matrix built")
        .expect("completion event must exist");
    assert_eq!(built.level, Level::INFO);
    assert_eq!(built.field("walks"), Some("6"));
}
