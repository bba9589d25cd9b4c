//! # genome-matcher
//!
//! A library for locating DNA fragments across a library of genomes and for scoring
//! how related two genomes are.
//!
//! Every window of a fixed seed length (the "minimum search length") of every
//! registered genome is stored in a prefix tree. Searches look the first seed-length
//! bases of a fragment up in that tree and then extend each hit base by base.
//!
//! ## Features
//!
//! - **Exact matching**: every base of the matched span must agree
//! - **SNP-tolerant matching**: a single mismatched base is allowed across the span
//! - **Longest-match selection**: only the longest extension found is reported, with ties
//! - **Relatedness scoring**: the percentage of a query's non-overlapping fragments
//!   found in each library genome
//! - **FASTA ingestion**: plain or gzip/bgzip compressed libraries and queries
//!
//! ## Example
//!
//! ```rust
//! use genome_matcher::{Genome, GenomeMatcher};
//!
//! let mut matcher = GenomeMatcher::new(4).unwrap();
//! matcher.add_genome(Genome::new("G1", "ACGTACGT").unwrap()).unwrap();
//!
//! // Exact search: both occurrences of ACGT are equally long
//! let matches = matcher.find_genomes_with_this_dna("ACGT", 4, true).unwrap();
//! for m in &matches {
//!     println!("{}: {} ({} bp)", m.genome_name, m.position, m.length);
//! }
//! assert_eq!(matches.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Bases, genomes and result types
//! - [`index`]: Prefix-tree seed index
//! - [`matching`]: Fragment and relatedness searches
//! - [`parsing`]: FASTA loading
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod index;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::genome::{Genome, GenomeError};
pub use crate::core::types::*;
pub use crate::index::trie::Trie;
pub use crate::matching::engine::{GenomeMatcher, MatchError};
