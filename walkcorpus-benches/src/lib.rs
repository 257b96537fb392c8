//! Benchmark support crate for walkcorpus.
//!
//! Provides synthetic graphs and parameter labels used by the Criterion
//! benchmarks for walk generation, pair counting, and the end-to-end
//! pipeline.

pub mod error;
pub mod params;
pub mod source;
