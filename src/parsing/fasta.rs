//! Genome loader for FASTA files using noodles.
//!
//! Each record becomes one [`Genome`]: the record name is the genome name and the
//! sequence lines are joined and upper-cased. Any base outside ACGTN rejects the file.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::genome::{Genome, GenomeError};
use crate::utils::validation::{check_genome_limit, MAX_GENOMES};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Invalid genome '{name}': {source}")]
    InvalidGenome {
        name: String,
        #[source]
        source: GenomeError,
    },

    #[error("Too many genomes: {0} exceeds maximum allowed ({MAX_GENOMES})")]
    TooManyGenomes(usize),
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Load every genome from a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidGenome` if a record has an empty sequence or an
/// unsupported base, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::TooManyGenomes` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<Genome>, ParseError> {
    let file = std::fs::File::open(path)?;

    let genomes = if is_gzipped(path) {
        read_genomes(BufReader::new(GzDecoder::new(file)))?
    } else {
        read_genomes(BufReader::new(file))?
    };

    debug!("Loaded {} genomes from {}", genomes.len(), path.display());
    Ok(genomes)
}

/// Load every genome from FASTA text.
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus file access.
pub fn read_genomes<R: BufRead>(reader: R) -> Result<Vec<Genome>, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut genomes = Vec::new();

    for result in fasta_reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check genome limit for DOS protection
        if check_genome_limit(genomes.len()).is_some() {
            return Err(ParseError::TooManyGenomes(genomes.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let genome = Genome::new(name.clone(), record.sequence().as_ref())
            .map_err(|source| ParseError::InvalidGenome { name, source })?;

        genomes.push(genome);
    }

    if genomes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    Ok(genomes)
}
