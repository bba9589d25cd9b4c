//! Loaders that turn sequence files into [`Genome`](crate::core::genome::Genome)s.
//!
//! - **FASTA files**: plain, gzip or bgzip compressed; one genome per record
//!
//! ## Example
//!
//! ```rust,no_run
//! use genome_matcher::parsing::fasta::parse_fasta_file;
//! use std::path::Path;
//!
//! let genomes = parse_fasta_file(Path::new("library.fa.gz")).unwrap();
//! for genome in &genomes {
//!     println!("{genome}");
//! }
//! ```
//!
//! ## Record rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Name | The record name (text up to the first whitespace) |
//! | Sequence | All lines up to the next record, concatenated |
//! | Case | Bases are upper-cased |
//! | Alphabet | Only A, C, G, T, N; anything else rejects the input |
//! | Empty | A record without bases, or input without records, is rejected |

pub mod fasta;
