//! Cumulative-weight key selection.

use rand::Rng;

use crate::error::SamplingError;

/// Draws one key with probability proportional to its weight.
///
/// A uniform value `r` in `[0, 1)` is drawn, weights are accumulated in
/// iteration order, and the first key whose cumulative weight reaches `r` is
/// returned. Weights are expected to sum to one; a shorter total leaves part
/// of the unit interval uncovered.
///
/// # Errors
/// Returns [`SamplingError::InvalidWeight`] for a negative or non-finite
/// weight and [`SamplingError::WeightsExhausted`] when the cumulative weight
/// never reaches the draw.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use walkcorpus_core::sample_weighted;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let key = sample_weighted([("only", 1.0)], &mut rng)?;
/// assert_eq!(key, "only");
/// # Ok::<(), walkcorpus_core::SamplingError>(())
/// ```
pub fn sample_weighted<K, I, R>(weights: I, rng: &mut R) -> Result<K, SamplingError>
where
    I: IntoIterator<Item = (K, f64)>,
    R: Rng + ?Sized,
{
    let draw: f64 = rng.r#gen();
    let mut total = 0.0_f64;
    for (position, (key, weight)) in weights.into_iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SamplingError::InvalidWeight { position, weight });
        }
        total += weight;
        if total >= draw {
            return Ok(key);
        }
    }
    Err(SamplingError::WeightsExhausted { total, draw })
}
