//! Edge-list provider that loads a two-column CSV into a [`walkcorpus_core::Graph`].

mod errors;
mod ingest;
mod provider;

pub use errors::EdgeListProviderError;
pub use provider::EdgeListProvider;

#[cfg(test)]
mod tests;
