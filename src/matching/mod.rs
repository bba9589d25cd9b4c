//! Fragment and relatedness searches over an indexed genome library.
//!
//! - [`GenomeMatcher`]: owns the registered genomes and the seed index
//! - [`comparison`]: base-by-base extension under exact or single-mismatch rules
//!
//! ## Fragment search
//!
//! 1. **Seed lookup**: the first `minimum_search_length()` bases of the fragment are
//!    looked up in the trie, exactly or tolerating one substitution
//! 2. **Fit check**: candidates too close to the end of their genome to hold the whole
//!    fragment are dropped
//! 3. **Extension**: each candidate is extended base by base; in SNP mode a single
//!    mismatch is allowed across the whole compared span
//! 4. **Selection**: only candidates reaching the longest extension are reported
//!
//! ## Relatedness
//!
//! The query genome is cut into non-overlapping fragments. Each fragment found at full
//! length in a library genome counts one hit for that genome, and the hit fraction is
//! reported as a percentage.
//!
//! ## Example
//!
//! ```rust
//! use genome_matcher::{Genome, GenomeMatcher};
//!
//! let mut matcher = GenomeMatcher::new(4).unwrap();
//! matcher.add_genome(Genome::new("G1", "ACGTACGT").unwrap()).unwrap();
//!
//! let matches = matcher.find_genomes_with_this_dna("ACGA", 4, false).unwrap();
//! assert_eq!(matches.len(), 2);
//!
//! let query = Genome::new("Q", "ACGTACGTA").unwrap();
//! let related = matcher.find_related_genomes(&query, 4, true, 50.0).unwrap();
//! assert_eq!(related[0].genome_name, "G1");
//! ```

pub mod comparison;
pub mod engine;

pub use engine::{GenomeMatcher, MatchError};
