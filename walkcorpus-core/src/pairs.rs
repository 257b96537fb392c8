//! Windowed co-occurrence pair extraction.
//!
//! For each offset `ω` in `1..=window_size` the walk is aligned against
//! itself shifted by `ω`; every aligned position yields a forward pair and a
//! reverse pair. The emitted sequence lists all forward pairs of an offset
//! before its reverse pairs, and offsets in increasing order.

use std::num::NonZeroUsize;

/// Ordered `(source, target)` node pair observed within a walk window.
///
/// # Examples
/// ```
/// use walkcorpus_core::CooccurrencePair;
///
/// let pair = CooccurrencePair::new(3, 1);
/// assert_eq!(pair.reversed(), CooccurrencePair::new(1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CooccurrencePair {
    /// Row coordinate in the co-occurrence matrix.
    pub source: usize,
    /// Column coordinate in the co-occurrence matrix.
    pub target: usize,
}

impl CooccurrencePair {
    /// Creates a pair.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self { Self { source, target } }

    /// Returns the pair with source and target swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

impl From<(usize, usize)> for CooccurrencePair {
    fn from((source, target): (usize, usize)) -> Self {
        Self::new(source, target)
    }
}

/// Visits every windowed pair of `walk` without allocating.
///
/// The callback also receives the offset `ω` that produced the pair.
pub fn for_each_pair<F>(walk: &[usize], window_size: NonZeroUsize, mut visit: F)
where
    F: FnMut(usize, CooccurrencePair),
{
    for offset in 1..=window_size.get() {
        if offset >= walk.len() {
            break;
        }
        let sources = &walk[..walk.len() - offset];
        let targets = &walk[offset..];
        for (&source, &target) in sources.iter().zip(targets) {
            visit(offset, CooccurrencePair::new(source, target));
        }
        for (&source, &target) in sources.iter().zip(targets) {
            visit(offset, CooccurrencePair::new(target, source));
        }
    }
}

/// Returns every windowed co-occurrence pair of `walk`.
///
/// Duplicates are kept: they are meaningful to the frequency count.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use walkcorpus_core::{CooccurrencePair, extract_pairs};
///
/// let window = NonZeroUsize::new(1).expect("window is non-zero");
/// let pairs = extract_pairs(&[4, 2, 7], window);
/// assert_eq!(
///     pairs,
///     vec![
///         CooccurrencePair::new(4, 2),
///         CooccurrencePair::new(2, 7),
///         CooccurrencePair::new(2, 4),
///         CooccurrencePair::new(7, 2),
///     ]
/// );
/// ```
#[must_use]
pub fn extract_pairs(walk: &[usize], window_size: NonZeroUsize) -> Vec<CooccurrencePair> {
    let mut pairs = Vec::with_capacity(pair_count(walk.len(), window_size));
    for_each_pair(walk, window_size, |_, pair| pairs.push(pair));
    pairs
}

/// Number of pairs emitted for a walk of `walk_len` nodes.
///
/// Equals `Σ_{ω=1..=window} 2·max(0, walk_len − ω)`.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use walkcorpus_core::pair_count;
///
/// let window = NonZeroUsize::new(3).expect("window is non-zero");
/// assert_eq!(pair_count(1, window), 0);
/// assert_eq!(pair_count(5, window), 2 * (4 + 3 + 2));
/// ```
#[must_use]
pub fn pair_count(walk_len: usize, window_size: NonZeroUsize) -> usize {
    (1..=window_size.get())
        .map(|offset| walk_len.saturating_sub(offset))
        .sum::<usize>()
        .saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use proptest::prelude::*;
    use rstest::rstest;

    fn window(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("test windows are non-zero")
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(80)]
    fn single_node_walk_yields_nothing(#[case] size: usize) {
        assert!(extract_pairs(&[9], window(size)).is_empty());
    }

    #[rstest]
    fn offsets_are_emitted_in_order() {
        let pairs = extract_pairs(&[0, 1, 2], window(2));
        let expected: Vec<CooccurrencePair> = [(0, 1), (1, 2), (1, 0), (2, 1), (0, 2), (2, 0)]
            .into_iter()
            .map(CooccurrencePair::from)
            .collect();
        assert_eq!(pairs, expected);
    }

    #[rstest]
    fn window_larger_than_walk_is_not_an_error() {
        let pairs = extract_pairs(&[5, 6], window(10));
        assert_eq!(
            pairs,
            vec![CooccurrencePair::new(5, 6), CooccurrencePair::new(6, 5)]
        );
    }

    #[rstest]
    fn duplicates_are_preserved() {
        let pairs = extract_pairs(&[0, 1, 0, 1], window(1));
        let forward = pairs
            .iter()
            .filter(|pair| **pair == CooccurrencePair::new(0, 1))
            .count();
        assert_eq!(forward, 3);
    }

    proptest! {
        #[test]
        fn pair_count_matches_extraction(
            walk in prop::collection::vec(0_usize..16, 0..40),
            size in 1_usize..8,
        ) {
            let pairs = extract_pairs(&walk, window(size));
            prop_assert_eq!(pairs.len(), pair_count(walk.len(), window(size)));
        }

        #[test]
        fn reverse_pairs_mirror_forward_pairs_per_offset(
            walk in prop::collection::vec(0_usize..6, 1..30),
            size in 1_usize..6,
        ) {
            let mut counts: HashMap<(usize, CooccurrencePair), u64> = HashMap::new();
            for_each_pair(&walk, window(size), |offset, pair| {
                *counts.entry((offset, pair)).or_default() += 1;
            });
            for (&(offset, pair), &count) in &counts {
                let mirrored = counts.get(&(offset, pair.reversed())).copied();
                prop_assert_eq!(mirrored, Some(count));
            }
        }
    }
}
