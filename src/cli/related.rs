//! Related command - score query genomes against the genome library.

use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{load_library, parse_percent, parse_positive_length, OutputFormat};
use crate::core::types::GenomeMatch;
use crate::matching::engine::{
    MatchError, DEFAULT_FRAGMENT_MATCH_LENGTH, DEFAULT_MATCH_PERCENT_THRESHOLD,
    DEFAULT_MIN_SEARCH_LENGTH,
};
use crate::parsing::fasta::parse_fasta_file;

#[derive(Args)]
pub struct RelatedArgs {
    /// Library FASTA files (optionally gzip/bgzip compressed)
    #[arg(required = true, num_args = 1..)]
    pub library: Vec<PathBuf>,

    /// FASTA file of query genomes; every record is scored separately
    #[arg(long, required = true)]
    pub query: PathBuf,

    /// Length of the non-overlapping fragments sampled from each query
    #[arg(long, default_value_t = DEFAULT_FRAGMENT_MATCH_LENGTH, value_parser = parse_positive_length)]
    pub fragment_length: usize,

    /// Length of the seed windows indexed for every library genome
    #[arg(long, default_value_t = DEFAULT_MIN_SEARCH_LENGTH, value_parser = parse_positive_length)]
    pub seed_length: usize,

    /// Minimum percentage of fragments matched for a genome to be reported (0-100)
    #[arg(long, default_value_t = DEFAULT_MATCH_PERCENT_THRESHOLD, value_parser = parse_percent)]
    pub threshold: f64,

    /// Allow one mismatched base (SNP) per fragment
    #[arg(long)]
    pub snp: bool,
}

/// Related genomes for one query record, sorted for display
#[derive(serde::Serialize)]
struct QueryResult {
    query: String,
    fragment_count: usize,
    related: Vec<GenomeMatch>,
}

/// Execute the related command
///
/// # Errors
///
/// Returns an error if the library or query cannot be loaded or the fragment length
/// is below the seed length.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RelatedArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let matcher = load_library(&args.library, args.seed_length, verbose)?;
    let queries = parse_fasta_file(&args.query)
        .with_context(|| format!("Failed to load query file {}", args.query.display()))?;

    if verbose {
        eprintln!(
            "Scoring {} query genomes with {} bp fragments",
            queries.len(),
            args.fragment_length
        );
    }

    let mut results = Vec::with_capacity(queries.len());
    for query in &queries {
        let mut related = match matcher.find_related_genomes(
            query,
            args.fragment_length,
            !args.snp,
            args.threshold,
        ) {
            Ok(related) => related,
            Err(MatchError::NoMatch) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        sort_for_display(&mut related);

        results.push(QueryResult {
            query: query.name().to_string(),
            fragment_count: query.len() / args.fragment_length,
            related,
        });
    }

    match format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Tsv => print_tsv(&results),
    }

    Ok(())
}

/// Highest percentage first, ties by genome name
fn sort_for_display(related: &mut [GenomeMatch]) {
    related.sort_by(|a, b| {
        b.percent_match
            .partial_cmp(&a.percent_match)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.genome_name.cmp(&b.genome_name))
    });
}

fn print_text(results: &[QueryResult]) {
    for result in results {
        println!(
            "{} ({} fragments sampled)",
            result.query, result.fragment_count
        );
        if result.related.is_empty() {
            println!("  No related genomes found");
        }
        for m in &result.related {
            println!("  {:6.2}%  {}", m.percent_match, m.genome_name);
        }
    }
}

fn print_tsv(results: &[QueryResult]) {
    println!("query\tgenome_name\tpercent_match");
    for result in results {
        for m in &result.related {
            println!("{}\t{}\t{:.4}", result.query, m.genome_name, m.percent_match);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_for_display() {
        let mut related = vec![
            GenomeMatch::new("b", 50.0),
            GenomeMatch::new("c", 75.0),
            GenomeMatch::new("a", 50.0),
        ];
        sort_for_display(&mut related);

        let names: Vec<_> = related.iter().map(|m| m.genome_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
