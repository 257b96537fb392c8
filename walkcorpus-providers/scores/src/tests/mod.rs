use super::{MAX_DIMENSION, ScoredMatrixProvider, ScoredMatrixProviderError};
use rstest::rstest;
use walkcorpus_test_support::fixtures::CsvFixture;

fn load(csv: &str) -> Result<ScoredMatrixProvider, ScoredMatrixProviderError> {
    ScoredMatrixProvider::try_from_reader("test", csv.as_bytes())
}

#[rstest]
fn shape_follows_largest_indices() {
    let provider = load("r,c,s\n0,0,1.0\n3,1,2.0\n").expect("valid scores");
    assert_eq!(provider.matrix().shape(), (4, 2));
    assert_eq!(provider.matrix().nnz(), 2);
    assert_eq!(provider.matrix().get(3, 1), Some(2.0));
}

#[rstest]
fn duplicate_coordinates_are_summed() {
    let provider = load("r,c,s\n1,1,0.25\n1,1,0.5\n").expect("valid scores");
    assert_eq!(provider.score_rows(), 2);
    assert_eq!(provider.matrix().nnz(), 1);
    assert_eq!(provider.matrix().get(1, 1), Some(0.75));
}

#[rstest]
fn square_input_matches_edge_list_shape_only_when_dense() {
    // Node 2 never appears as a column, so the shape is not square.
    let provider = load("r,c,s\n0,1,1\n2,0,1\n").expect("valid scores");
    assert_eq!(provider.matrix().shape(), (3, 2));
    assert!(!provider.matrix().is_symmetric());
}

#[rstest]
#[case::header_only("r,c,s\n")]
#[case::empty("")]
fn rejects_empty_input(#[case] csv: &str) {
    let err = load(csv).expect_err("no rows means no matrix");
    assert!(matches!(err, ScoredMatrixProviderError::EmptyInput));
}

#[rstest]
#[case::nan("r,c,s\n0,0,NaN\n")]
#[case::infinite("r,c,s\n0,0,inf\n")]
#[case::overflow("r,c,s\n0,0,1e300\n")]
#[case::negative_overflow("r,c,s\n0,0,-1e39\n")]
fn rejects_non_finite_scores(#[case] csv: &str) {
    let err = load(csv).expect_err("scores must be finite");
    assert!(matches!(
        err,
        ScoredMatrixProviderError::NonFiniteScore { line: 2, .. }
    ));
}

#[rstest]
fn keeps_scores_that_fit_single_precision() {
    let provider = load("r,c,s\n0,0,3.0e38\n").expect("score fits in f32");
    let stored = provider.matrix().get(0, 0).expect("entry is stored");
    assert!(stored.is_finite() && stored > 2.9e38, "stored {stored}");
}

#[rstest]
#[case::huge_row("r,c,s\n0,0,1\n100000000000000,0,1\n", 100_000_000_000_001, 1)]
#[case::huge_col("r,c,s\n0,0,1\n0,100000000000000,1\n", 1, 100_000_000_000_001)]
#[case::max_index(
    "r,c,s\n0,0,1\n18446744073709551615,0,1\n",
    usize::MAX,
    1
)]
fn rejects_shapes_beyond_the_dimension_limit(
    #[case] csv: &str,
    #[case] rows: usize,
    #[case] cols: usize,
) {
    let err = load(csv).expect_err("oversized shape must be rejected before allocation");
    match err {
        ScoredMatrixProviderError::ShapeTooLarge {
            line,
            rows: found_rows,
            cols: found_cols,
            limit,
        } => {
            assert_eq!(line, 3);
            assert_eq!((found_rows, found_cols), (rows, cols));
            assert_eq!(limit, MAX_DIMENSION);
        }
        other => panic!("expected ShapeTooLarge, got {other:?}"),
    }
}

#[rstest]
fn first_index_past_the_limit_is_rejected() {
    let err = load(&format!("r,c,s\n{MAX_DIMENSION},0,1\n")).expect_err("index equals the limit");
    assert!(matches!(
        err,
        ScoredMatrixProviderError::ShapeTooLarge { line: 2, rows, cols: 1, .. }
            if rows == MAX_DIMENSION + 1
    ));
}

#[rstest]
#[case::two_fields("r,c,s\n0,1\n", 2)]
#[case::four_fields("r,c,s\n0,1,2,3\n", 4)]
fn rejects_wrong_field_count(#[case] csv: &str, #[case] found: usize) {
    let err = load(csv).expect_err("field count must be enforced");
    assert!(matches!(
        err,
        ScoredMatrixProviderError::FieldCount { line: 2, found: f } if f == found
    ));
}

#[rstest]
#[case::negative_index("r,c,s\n-1,0,1\n")]
#[case::text_score("r,c,s\n0,0,high\n")]
fn rejects_unparseable_fields(#[case] csv: &str) {
    let err = load(csv).expect_err("fields must parse");
    assert!(matches!(
        err,
        ScoredMatrixProviderError::InvalidField { line: 2, .. }
    ));
}

#[rstest]
fn loads_from_path() {
    let fixture =
        CsvFixture::new("row,col,score", ["0,1,3", "1,0,3"]).expect("fixture must be written");
    let provider =
        ScoredMatrixProvider::try_from_path("pairs", fixture.path()).expect("valid scores");
    assert_eq!(provider.name(), "pairs");
    assert!(provider.into_matrix().is_symmetric());
}
