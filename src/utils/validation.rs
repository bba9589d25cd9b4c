//! Centralized validation and helper functions.

use crate::core::base::Base;

/// Maximum number of genomes accepted from a single FASTA file (DOS protection)
pub const MAX_GENOMES: usize = 100_000;

/// Check whether a byte is a supported base symbol (A, C, G, T, N in either case).
///
/// # Examples
///
/// ```
/// use genome_matcher::utils::validation::is_valid_base;
///
/// assert!(is_valid_base(b'A'));
/// assert!(is_valid_base(b'n'));
/// assert!(!is_valid_base(b'U'));
/// ```
#[must_use]
pub fn is_valid_base(byte: u8) -> bool {
    Base::from_ascii(byte).is_some()
}

/// Find the first byte that is not a supported base.
///
/// Returns the position and the offending byte, or None if the whole sequence is valid.
#[must_use]
pub fn find_invalid_base(sequence: &[u8]) -> Option<(usize, u8)> {
    sequence
        .iter()
        .copied()
        .enumerate()
        .find(|&(_, b)| !is_valid_base(b))
}

/// Upper-case a sequence that has already been validated.
#[must_use]
pub fn normalize_sequence(sequence: &[u8]) -> String {
    sequence
        .iter()
        .map(|b| char::from(b.to_ascii_uppercase()))
        .collect()
}

/// Check if adding another genome would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new genome.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_genome_limit(count: usize) -> Option<String> {
    if count >= MAX_GENOMES {
        Some(format!(
            "Too many genomes: adding another would exceed maximum of {MAX_GENOMES}"
        ))
    } else {
        None
    }
}

/// Safely convert usize to f64 for percentage calculations
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
