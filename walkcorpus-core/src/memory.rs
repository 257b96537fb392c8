//! Pre-flight memory estimation for the corpus pipeline.
//!
//! Provides a conservative estimate of peak memory so callers can reject
//! oversized graphs before any walk is generated. A safety multiplier covers
//! heap fragmentation, per-worker partial maps, and transient allocations.

use crate::{builder::CorpusParams, pairs::pair_count};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Safety multiplier (1.5×) applied to the raw estimate.
const SAFETY_MULTIPLIER_NUMERATOR: u64 = 3;
const SAFETY_MULTIPLIER_DENOMINATOR: u64 = 2;

/// `Vec` header stored per walk.
const WALK_HEADER_BYTES: u64 = 24;

/// Size of a `usize` on 64-bit platforms, used for walk entries and CSR
/// column indices.
const USIZE_BYTES: u64 = 8;

/// Per-entry cost of the frequency map: a two-`usize` key, a `u64` count,
/// the control byte, and load-factor slack rounded up.
const FREQUENCY_ENTRY_BYTES: u64 = 40;

/// Per-entry cost of the triplet staging area (`row`, `col`, `f32`).
const TRIPLET_ENTRY_BYTES: u64 = 24;

/// Per-entry cost of the CSR matrix (`usize` index plus `f32` value, padded).
const CSR_ENTRY_BYTES: u64 = 12;

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Returns a conservative estimate of peak memory (in bytes) for running the
/// pipeline over a graph with `node_count` nodes.
///
/// The estimate covers:
///
/// - The walk corpus (`N × number_of_walks` walks of up to `walk_length`
///   nodes each).
/// - The unpruned frequency map, whose distinct pairs are bounded by both
///   the number of emitted pairs and `N²`.
/// - The triplet staging area and the CSR matrix for those pairs.
///
/// # Examples
///
/// ```
/// use walkcorpus_core::{CorpusParams, estimate_peak_bytes};
///
/// let params = CorpusParams::default();
/// assert!(estimate_peak_bytes(1_000, &params) > 0);
/// assert_eq!(estimate_peak_bytes(0, &params), 0);
/// ```
#[must_use]
pub fn estimate_peak_bytes(node_count: usize, params: &CorpusParams) -> u64 {
    if node_count == 0 {
        return 0;
    }

    let n = node_count as u64;
    let walk_length = params.walk_length().get() as u64;
    let walks = n.saturating_mul(params.number_of_walks().get() as u64);

    let corpus = walks.saturating_mul(
        walk_length
            .saturating_mul(USIZE_BYTES)
            .saturating_add(WALK_HEADER_BYTES),
    );

    let pairs_per_walk = pair_count(params.walk_length().get(), params.window_size()) as u64;
    let emitted = walks.saturating_mul(pairs_per_walk);
    let distinct = emitted.min(n.saturating_mul(n));

    let frequencies = distinct.saturating_mul(FREQUENCY_ENTRY_BYTES);
    let staging = distinct.saturating_mul(TRIPLET_ENTRY_BYTES);
    let matrix = distinct
        .saturating_mul(CSR_ENTRY_BYTES)
        .saturating_add(n.saturating_add(1).saturating_mul(USIZE_BYTES));

    let subtotal = corpus
        .saturating_add(frequencies)
        .saturating_add(staging)
        .saturating_add(matrix);

    subtotal
        .saturating_mul(SAFETY_MULTIPLIER_NUMERATOR)
        .saturating_div(SAFETY_MULTIPLIER_DENOMINATOR)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Formats a byte count as a human-readable string using binary units.
///
/// # Examples
///
/// ```
/// use walkcorpus_core::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.5 MiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (1 << 40, "TiB"),
        (1 << 30, "GiB"),
        (1 << 20, "MiB"),
        (1 << 10, "KiB"),
    ];

    UNITS
        .iter()
        .find(|(scale, _)| bytes >= *scale)
        .map_or_else(
            || format!("{bytes} B"),
            |&(scale, unit)| format!("{:.1} {unit}", bytes as f64 / scale as f64),
        )
}
