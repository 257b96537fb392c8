//! Builder utilities for configuring corpus construction.
//!
//! Exposes the execution strategy selection surface and the validation used
//! before constructing [`CorpusPipeline`] instances.

use std::num::NonZeroUsize;

use crate::{Result, error::CorpusError, pipeline::CorpusPipeline};

pub(crate) const DEFAULT_WALK_LENGTH: usize = 80;
pub(crate) const DEFAULT_NUMBER_OF_WALKS: usize = 10;
pub(crate) const DEFAULT_WINDOW_SIZE: usize = 3;
pub(crate) const DEFAULT_PRUNING_THRESHOLD: u64 = 10;
pub(crate) const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Indicates how walk generation and pair counting are scheduled.
///
/// `Auto` resolves deterministically: it selects `Parallel` when the
/// `parallel` feature is compiled in and `Sequential` otherwise. Both
/// schedules produce the same corpus for the same seed.
///
/// # Examples
/// ```
/// use walkcorpus_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Allow the library to select a schedule automatically.
    #[default]
    Auto,
    /// Run every stage on the calling thread.
    Sequential,
    /// Spread walks and pair counting across Rayon workers.
    Parallel,
}

/// Concrete schedule an [`ExecutionStrategy`] resolves to in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Schedule {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

impl ExecutionStrategy {
    pub(crate) fn schedule(self) -> Result<Schedule> {
        match self {
            Self::Sequential => Ok(Schedule::Sequential),
            #[cfg(feature = "parallel")]
            Self::Auto | Self::Parallel => Ok(Schedule::Parallel),
            #[cfg(not(feature = "parallel"))]
            Self::Auto => Ok(Schedule::Sequential),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(CorpusError::BackendUnavailable {
                requested: Self::Parallel,
            }),
        }
    }
}

/// Validated parameters shared by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusParams {
    walk_length: NonZeroUsize,
    number_of_walks: NonZeroUsize,
    window_size: NonZeroUsize,
    pruning_threshold: u64,
    seed: u64,
}

impl CorpusParams {
    /// Maximum number of nodes per walk.
    #[must_use]
    pub fn walk_length(&self) -> NonZeroUsize {
        self.walk_length
    }

    /// Number of walks started from every node.
    #[must_use]
    pub fn number_of_walks(&self) -> NonZeroUsize {
        self.number_of_walks
    }

    /// Largest positional offset paired by the extractor.
    #[must_use]
    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    /// Counts must exceed this value to survive pruning.
    #[must_use]
    pub fn pruning_threshold(&self) -> u64 {
        self.pruning_threshold
    }

    /// Seed from which every per-walk generator is derived.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for CorpusParams {
    fn default() -> Self {
        Self {
            walk_length: non_zero_or_one(DEFAULT_WALK_LENGTH),
            number_of_walks: non_zero_or_one(DEFAULT_NUMBER_OF_WALKS),
            window_size: non_zero_or_one(DEFAULT_WINDOW_SIZE),
            pruning_threshold: DEFAULT_PRUNING_THRESHOLD,
            seed: DEFAULT_SEED,
        }
    }
}

const fn non_zero_or_one(value: usize) -> NonZeroUsize {
    match NonZeroUsize::new(value) {
        Some(non_zero) => non_zero,
        None => NonZeroUsize::MIN,
    }
}

/// Configures and constructs [`CorpusPipeline`] instances.
///
/// # Examples
/// ```
/// use walkcorpus_core::{CorpusBuilder, ExecutionStrategy};
///
/// let pipeline = CorpusBuilder::new()
///     .with_walk_length(40)
///     .with_window_size(5)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(pipeline.params().walk_length().get(), 40);
/// assert_eq!(pipeline.params().window_size().get(), 5);
/// assert_eq!(pipeline.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    walk_length: usize,
    number_of_walks: usize,
    window_size: usize,
    pruning_threshold: u64,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    max_bytes: Option<u64>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self {
            walk_length: DEFAULT_WALK_LENGTH,
            number_of_walks: DEFAULT_NUMBER_OF_WALKS,
            window_size: DEFAULT_WINDOW_SIZE,
            pruning_threshold: DEFAULT_PRUNING_THRESHOLD,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::Auto,
            max_bytes: None,
        }
    }
}

impl CorpusBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::CorpusBuilder;
    ///
    /// let builder = CorpusBuilder::new();
    /// assert_eq!(builder.walk_length(), 80);
    /// assert_eq!(builder.number_of_walks(), 10);
    /// assert_eq!(builder.window_size(), 3);
    /// assert_eq!(builder.pruning_threshold(), 10);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the maximum number of nodes per walk.
    #[must_use]
    pub fn with_walk_length(mut self, walk_length: usize) -> Self {
        self.walk_length = walk_length;
        self
    }

    /// Returns the configured walk length.
    #[must_use]
    pub fn walk_length(&self) -> usize {
        self.walk_length
    }

    /// Overrides how many walks start from every node.
    #[must_use]
    pub fn with_number_of_walks(mut self, number_of_walks: usize) -> Self {
        self.number_of_walks = number_of_walks;
        self
    }

    /// Returns the configured number of walks per node.
    #[must_use]
    pub fn number_of_walks(&self) -> usize {
        self.number_of_walks
    }

    /// Overrides the largest offset used when pairing walk positions.
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Returns the configured window size.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Overrides the exclusive count a pair must exceed to be kept.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::CorpusBuilder;
    ///
    /// let builder = CorpusBuilder::new().with_pruning_threshold(0);
    /// assert_eq!(builder.pruning_threshold(), 0);
    /// ```
    #[must_use]
    pub fn with_pruning_threshold(mut self, threshold: u64) -> Self {
        self.pruning_threshold = threshold;
        self
    }

    /// Returns the configured pruning threshold.
    #[must_use]
    pub fn pruning_threshold(&self) -> u64 {
        self.pruning_threshold
    }

    /// Seeds walk generation so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the execution strategy to use when running the pipeline.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Rejects runs whose estimated peak memory exceeds `max_bytes`.
    ///
    /// `None` disables the check.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: Option<u64>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the configured memory ceiling, if any.
    #[must_use]
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Validates the stage parameters without constructing a pipeline.
    ///
    /// # Errors
    /// Returns [`CorpusError::InvalidWalkLength`],
    /// [`CorpusError::InvalidNumberOfWalks`], or
    /// [`CorpusError::InvalidWindowSize`] when the matching value is zero.
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::CorpusBuilder;
    ///
    /// let params = CorpusBuilder::new().with_seed(9).params()?;
    /// assert_eq!(params.seed(), 9);
    /// assert_eq!(params.number_of_walks().get(), 10);
    /// # Ok::<(), walkcorpus_core::CorpusError>(())
    /// ```
    pub fn params(&self) -> Result<CorpusParams> {
        let walk_length = NonZeroUsize::new(self.walk_length).ok_or(
            CorpusError::InvalidWalkLength {
                got: self.walk_length,
            },
        )?;
        let number_of_walks = NonZeroUsize::new(self.number_of_walks).ok_or(
            CorpusError::InvalidNumberOfWalks {
                got: self.number_of_walks,
            },
        )?;
        let window_size = NonZeroUsize::new(self.window_size).ok_or(
            CorpusError::InvalidWindowSize {
                got: self.window_size,
            },
        )?;

        Ok(CorpusParams {
            walk_length,
            number_of_walks,
            window_size,
            pruning_threshold: self.pruning_threshold,
            seed: self.seed,
        })
    }

    /// Validates the configuration and constructs a [`CorpusPipeline`].
    ///
    /// # Errors
    /// Returns the same errors as [`Self::params`].
    ///
    /// # Examples
    /// ```
    /// use walkcorpus_core::{CorpusBuilder, CorpusError};
    ///
    /// let err = CorpusBuilder::new()
    ///     .with_window_size(0)
    ///     .build()
    ///     .expect_err("zero window must be rejected");
    /// assert!(matches!(err, CorpusError::InvalidWindowSize { got: 0 }));
    /// ```
    pub fn build(self) -> Result<CorpusPipeline> {
        let params = self.params()?;
        Ok(CorpusPipeline::new(
            params,
            self.execution_strategy,
            self.max_bytes,
        ))
    }
}
