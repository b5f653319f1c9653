//! Heuristic shell handling: chain splitting and wrapper normalization.

mod normalizer;
mod splitter;

pub use normalizer::normalize;
pub use splitter::split_chain;
