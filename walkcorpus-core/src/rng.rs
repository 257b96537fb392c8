//! Per-walk RNG derivation.
//!
//! Every walk owns a generator seeded from the run seed and the walk's
//! ordinal, so the corpus is identical whether walks are sampled on one
//! thread or spread across Rayon workers.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-walk seed
/// derivation.
const WALK_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(crate) fn mix_walk_seed(base_seed: u64, ordinal: usize) -> u64 {
    splitmix64(base_seed ^ ((ordinal as u64).wrapping_add(1).wrapping_mul(WALK_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WALK_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Returns the generator owned by the walk at `ordinal`.
pub(crate) fn walk_rng(base_seed: u64, ordinal: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_walk_seed(base_seed, ordinal))
}
