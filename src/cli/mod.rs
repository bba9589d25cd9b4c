//! Command-line interface for genome-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find the longest occurrences of a DNA fragment in a genome library
//! - **related**: Score how related query genomes are to every library genome
//!
//! ## Usage
//!
//! ```text
//! # Exact search, 10 bp seeds
//! genome-matcher search library.fa --fragment ACGTTGCAAGTC
//!
//! # Allow one mismatched base and require at least 12 matching bases
//! genome-matcher search library.fa --fragment ACGTTGCAAGTCCA --min-length 12 --snp
//!
//! # Relatedness of each record in sample.fa, JSON output
//! genome-matcher --format json related library.fa --query sample.fa --threshold 10
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::matching::engine::GenomeMatcher;
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};

pub mod related;
pub mod search;

#[derive(Parser)]
#[command(name = "genome-matcher")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Locate DNA fragments across a genome library and score genome relatedness")]
#[command(
    long_about = "genome-matcher indexes every seed-length window of a library of genomes.\n\nIt can:\n- Find the longest occurrences of a fragment, exactly or allowing one mismatched base (SNP)\n- Score query genomes by the percentage of their fragments found in each library genome"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find where a DNA fragment occurs in the library
    Search(search::SearchArgs),

    /// Find library genomes related to query genomes
    Related(related::RelatedArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Parse a length that must be at least 1
fn parse_positive_length(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a non-negative integer"))?;
    if value == 0 {
        return Err("length must be at least 1".to_string());
    }
    Ok(value)
}

/// Parse a percentage in [0, 100]
fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("{value} is outside 0-100"));
    }
    Ok(value)
}

/// Load library FASTA files and register every genome with a new matcher
fn load_library(
    paths: &[PathBuf],
    seed_length: usize,
    verbose: bool,
) -> anyhow::Result<GenomeMatcher> {
    let mut matcher = GenomeMatcher::new(seed_length)?;

    for path in paths {
        if !is_fasta_file(path) {
            warn!(
                "{} does not have a FASTA extension; reading it as FASTA",
                path.display()
            );
        }

        let genomes = parse_fasta_file(path)
            .with_context(|| format!("Failed to load library file {}", path.display()))?;

        for genome in genomes {
            matcher
                .add_genome(genome)
                .with_context(|| format!("Failed to register genomes from {}", path.display()))?;
        }
    }

    if verbose {
        eprintln!(
            "Indexed {} genomes ({} seeds of {} bp)",
            matcher.len(),
            matcher.indexed_seed_count(),
            matcher.minimum_search_length()
        );
    }

    Ok(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_length() {
        assert_eq!(parse_positive_length("12"), Ok(12));
        assert!(parse_positive_length("0").is_err());
        assert!(parse_positive_length("-3").is_err());
        assert!(parse_positive_length("abc").is_err());
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("0"), Ok(0.0));
        assert_eq!(parse_percent("37.5"), Ok(37.5));
        assert!(parse_percent("100.1").is_err());
        assert!(parse_percent("-1").is_err());
        assert!(parse_percent("lots").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
