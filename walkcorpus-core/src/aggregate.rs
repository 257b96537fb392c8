//! Pair frequency aggregation and pruning.
//!
//! Counting is a pure fold from a [`WalkCorpus`] to a [`FrequencyMap`]. Under
//! the parallel schedule each Rayon worker folds into its own map and the
//! partial maps are merged by summing counts, so no counter is ever shared
//! between threads.
//!
//! # Memory
//!
//! The unpruned [`FrequencyMap`] is the pipeline's peak allocation: it holds
//! one entry per distinct pair, bounded by both the number of pairs the
//! corpus emits and `node_count²`. Pruning only shrinks it afterwards. See
//! [`crate::estimate_peak_bytes`] for the estimate used by the memory guard.

use std::collections::{HashMap, hash_map};
use std::num::NonZeroUsize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, Schedule},
    corpus::WalkCorpus,
    pairs::{CooccurrencePair, for_each_pair},
};

/// Occurrence count of every pair emitted by a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: HashMap<CooccurrencePair, u64>,
}

impl FrequencyMap {
    /// Returns the count recorded for `pair`, if any.
    #[must_use]
    pub fn get(&self, pair: CooccurrencePair) -> Option<u64> {
        self.counts.get(&pair).copied()
    }

    /// Returns the number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns whether no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of pairs emitted by the corpus.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(pair, count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (CooccurrencePair, u64)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Records one occurrence of `pair`.
    pub fn record(&mut self, pair: CooccurrencePair) {
        *self.counts.entry(pair).or_insert(0) += 1;
    }

    /// Adds every count of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        // Fold the smaller map into the larger one.
        let (mut into, from) = if self.counts.len() >= other.counts.len() {
            (std::mem::take(&mut self.counts), other.counts)
        } else {
            (other.counts, std::mem::take(&mut self.counts))
        };
        for (pair, count) in from {
            *into.entry(pair).or_insert(0) += count;
        }
        self.counts = into;
    }

    /// Keeps only pairs whose count is strictly greater than `threshold`.
    ///
    /// A threshold of zero keeps every observed pair. Pruning everything is
    /// not an error; it yields an empty mapping and a warning.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::{CooccurrencePair, FrequencyMap};
    ///
    /// let mut counts = FrequencyMap::default();
    /// counts.record(CooccurrencePair::new(0, 1));
    /// counts.record(CooccurrencePair::new(0, 1));
    /// counts.record(CooccurrencePair::new(1, 0));
    /// let pruned = counts.prune(1);
    /// assert_eq!(pruned.len(), 1);
    /// assert_eq!(pruned.get(CooccurrencePair::new(0, 1)), Some(2));
    /// ```
    #[must_use]
    pub fn prune(self, threshold: u64) -> PrunedFrequencies {
        let observed = self.counts.len();
        let mut counts = self.counts;
        counts.retain(|_, count| *count > threshold);
        if counts.is_empty() && observed > 0 {
            warn!(
                threshold,
                observed, "pruning threshold removed every co-occurrence pair"
            );
        } else {
            debug!(
                threshold,
                observed,
                retained = counts.len(),
                "co-occurrence pairs pruned"
            );
        }
        PrunedFrequencies { counts, threshold }
    }
}

impl FromIterator<CooccurrencePair> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = CooccurrencePair>>(iter: I) -> Self {
        let mut map = Self::default();
        for pair in iter {
            map.record(pair);
        }
        map
    }
}

/// Pair counts that survived pruning.
///
/// Every stored count is strictly greater than [`Self::threshold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunedFrequencies {
    counts: HashMap<CooccurrencePair, u64>,
    threshold: u64,
}

impl PrunedFrequencies {
    /// Returns the count retained for `pair`, if it survived pruning.
    #[must_use]
    pub fn get(&self, pair: CooccurrencePair) -> Option<u64> {
        self.counts.get(&pair).copied()
    }

    /// Returns the number of surviving pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns whether every pair was pruned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Threshold the counts were pruned against.
    #[must_use]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Iterates over `(pair, count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (CooccurrencePair, u64)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }
}

impl IntoIterator for PrunedFrequencies {
    type Item = (CooccurrencePair, u64);
    type IntoIter = hash_map::IntoIter<CooccurrencePair, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Counts every windowed pair emitted by `corpus`.
///
/// # Errors
/// Returns [`crate::CorpusError::BackendUnavailable`] when `strategy` asks
/// for a schedule that is not compiled in.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use walkcorpus_core::{CooccurrencePair, ExecutionStrategy, Walk, WalkCorpus, count_pairs};
///
/// let walk = Walk::from_nodes(vec![0, 1, 0]).expect("sequence is non-empty");
/// let corpus = WalkCorpus::from_walks(vec![walk]);
/// let window = NonZeroUsize::new(1).expect("window is non-zero");
/// let counts = count_pairs(&corpus, window, ExecutionStrategy::Sequential)?;
/// assert_eq!(counts.get(CooccurrencePair::new(0, 1)), Some(2));
/// assert_eq!(counts.total(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.count_pairs",
    err,
    skip(corpus),
    fields(walks = corpus.len(), window_size = window_size.get()),
)]
pub fn count_pairs(
    corpus: &WalkCorpus,
    window_size: NonZeroUsize,
    strategy: ExecutionStrategy,
) -> Result<FrequencyMap> {
    let counts = match strategy.schedule()? {
        Schedule::Sequential => corpus
            .iter()
            .fold(FrequencyMap::default(), |mut counts, walk| {
                for_each_pair(walk.nodes(), window_size, |_, pair| counts.record(pair));
                counts
            }),
        #[cfg(feature = "parallel")]
        Schedule::Parallel => corpus
            .walks()
            .par_iter()
            .fold(FrequencyMap::default, |mut counts, walk| {
                for_each_pair(walk.nodes(), window_size, |_, pair| counts.record(pair));
                counts
            })
            .reduce(FrequencyMap::default, |mut left, right| {
                left.merge(right);
                left
            }),
    };
    debug!(distinct = counts.len(), "co-occurrence pairs counted");
    Ok(counts)
}
