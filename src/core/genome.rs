use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::{find_invalid_base, normalize_sequence};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenomeError {
    #[error("Genome name is empty")]
    EmptyName,

    #[error("Genome sequence is empty")]
    EmptySequence,

    #[error("Invalid base '{base}' at position {position}")]
    InvalidBase { base: char, position: usize },

    #[error("Cannot extract {length} bases at position {position} from a genome of length {genome_length}")]
    OutOfRange {
        position: usize,
        length: usize,
        genome_length: usize,
    },
}

/// A named DNA sequence over A, C, G, T and N
///
/// The sequence is validated and upper-cased on construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    name: String,
    sequence: String,
}

impl Genome {
    /// Create a genome, validating the name and alphabet
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::EmptyName` or `GenomeError::EmptySequence` for empty input,
    /// or `GenomeError::InvalidBase` if the sequence contains a symbol outside ACGTN.
    pub fn new(name: impl Into<String>, sequence: impl AsRef<[u8]>) -> Result<Self, GenomeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GenomeError::EmptyName);
        }

        let sequence = sequence.as_ref();
        if sequence.is_empty() {
            return Err(GenomeError::EmptySequence);
        }

        if let Some((position, byte)) = find_invalid_base(sequence) {
            return Err(GenomeError::InvalidBase {
                base: char::from(byte),
                position,
            });
        }

        Ok(Self {
            name,
            sequence: normalize_sequence(sequence),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper-case sequence
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of bases
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false: a genome cannot be constructed without bases
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Extract `length` bases starting at `position`
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::OutOfRange` if `position` is past the end, `length` is zero,
    /// or the span runs past the end of the sequence.
    pub fn extract(&self, position: usize, length: usize) -> Result<&str, GenomeError> {
        let out_of_range = position >= self.len()
            || length == 0
            || position
                .checked_add(length)
                .map_or(true, |end| end > self.len());

        if out_of_range {
            return Err(GenomeError::OutOfRange {
                position,
                length,
                genome_length: self.len(),
            });
        }

        Ok(&self.sequence[position..position + length])
    }
}

impl std::fmt::Display for Genome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bp)", self.name, self.len())
    }
}
