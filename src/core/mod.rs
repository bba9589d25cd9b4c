//! Core data types for genome matching.
//!
//! - [`Base`]: the supported alphabet (A, C, G, T and the unknown base N)
//! - [`Genome`]: a validated, immutable named sequence
//! - [`DnaMatch`], [`GenomeMatch`]: search results
//! - [`MatchMode`]: exact or single-mismatch comparison

pub mod base;
pub mod genome;
pub mod types;

pub use base::Base;
pub use genome::{Genome, GenomeError};
pub use types::{DnaMatch, GenomeMatch, MatchMode};
