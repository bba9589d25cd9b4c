use serde::{Deserialize, Serialize};

/// A located fragment: where in which genome, and how many bases matched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnaMatch {
    /// Name of the library genome containing the match
    pub genome_name: String,

    /// Zero-based start position within that genome
    pub position: usize,

    /// Number of fragment bases matched from the start of the fragment
    pub length: usize,
}

impl DnaMatch {
    pub fn new(genome_name: impl Into<String>, position: usize, length: usize) -> Self {
        Self {
            genome_name: genome_name.into(),
            position,
            length,
        }
    }
}

impl std::fmt::Display for DnaMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} ({} bp)",
            self.genome_name, self.position, self.length
        )
    }
}

/// Relatedness of a library genome to a query genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeMatch {
    /// Name of the library genome
    pub genome_name: String,

    /// Percentage of sampled query fragments found in this genome, in [0, 100]
    pub percent_match: f64,
}

impl GenomeMatch {
    pub fn new(genome_name: impl Into<String>, percent_match: f64) -> Self {
        Self {
            genome_name: genome_name.into(),
            percent_match,
        }
    }
}

/// How a fragment is compared against a genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every base must be equal
    Exact,
    /// At most one base may differ (a single SNP)
    OneMismatch,
}

impl MatchMode {
    #[must_use]
    pub fn from_exact_only(exact_match_only: bool) -> Self {
        if exact_match_only {
            Self::Exact
        } else {
            Self::OneMismatch
        }
    }

    #[must_use]
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Number of mismatched bases tolerated across a compared span
    #[must_use]
    pub fn mismatch_budget(self) -> usize {
        match self {
            Self::Exact => 0,
            Self::OneMismatch => 1,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::OneMismatch => write!(f, "one-mismatch"),
        }
    }
}
