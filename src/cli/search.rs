//! Search command - locate a fragment across the genome library.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_library, parse_positive_length, OutputFormat};
use crate::core::types::{DnaMatch, MatchMode};
use crate::matching::engine::{MatchError, DEFAULT_MIN_SEARCH_LENGTH};

#[derive(Args)]
pub struct SearchArgs {
    /// Library FASTA files (optionally gzip/bgzip compressed)
    #[arg(required = true, num_args = 1..)]
    pub library: Vec<PathBuf>,

    /// DNA fragment to search for
    #[arg(long, required = true)]
    pub fragment: String,

    /// Minimum number of fragment bases that must match (defaults to the seed length)
    #[arg(long, value_parser = parse_positive_length)]
    pub min_length: Option<usize>,

    /// Length of the seed windows indexed for every library genome
    #[arg(long, default_value_t = DEFAULT_MIN_SEARCH_LENGTH, value_parser = parse_positive_length)]
    pub seed_length: usize,

    /// Allow one mismatched base (SNP) across the matched span
    #[arg(long)]
    pub snp: bool,
}

/// Execute the search command
///
/// # Errors
///
/// Returns an error if the library cannot be loaded or the requested lengths are invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let matcher = load_library(&args.library, args.seed_length, verbose)?;
    let minimum_length = args.min_length.unwrap_or(args.seed_length);
    let mode = MatchMode::from_exact_only(!args.snp);

    if verbose {
        eprintln!(
            "Searching for a {} bp fragment (minimum {minimum_length} bp, {mode} mode)",
            args.fragment.len()
        );
    }

    let matches = match matcher.find_genomes_with_this_dna(&args.fragment, minimum_length, !args.snp)
    {
        Ok(matches) => matches,
        Err(MatchError::NoMatch) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => print_text(&args.fragment, &matches),
        OutputFormat::Json => print_json(&args.fragment, minimum_length, mode, &matches)?,
        OutputFormat::Tsv => print_tsv(&matches),
    }

    Ok(())
}

fn print_text(fragment: &str, matches: &[DnaMatch]) {
    let Some(first) = matches.first() else {
        println!("No matches found for {fragment}");
        return;
    };

    println!(
        "{} match(es) of length {} for {fragment}:",
        matches.len(),
        first.length
    );
    for m in matches {
        println!("  {}: position {}", m.genome_name, m.position);
    }
}

fn print_json(
    fragment: &str,
    minimum_length: usize,
    mode: MatchMode,
    matches: &[DnaMatch],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "fragment": fragment,
        "minimum_length": minimum_length,
        "mode": mode,
        "matches": matches,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(matches: &[DnaMatch]) {
    println!("genome_name\tposition\tlength");
    for m in matches {
        println!("{}\t{}\t{}", m.genome_name, m.position, m.length);
    }
}
