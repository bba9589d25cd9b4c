use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::genome::Genome;
use crate::core::types::{DnaMatch, GenomeMatch, MatchMode};
use crate::index::trie::{Trie, TrieError};
use crate::matching::comparison::extension_length;
use crate::utils::validation::count_to_f64;

/// Default seed length indexed for every genome
pub const DEFAULT_MIN_SEARCH_LENGTH: usize = 10;

/// Default length of the query fragments sampled by relatedness searches
pub const DEFAULT_FRAGMENT_MATCH_LENGTH: usize = 16;

/// Default minimum percentage for a genome to be reported as related
pub const DEFAULT_MATCH_PERCENT_THRESHOLD: f64 = 20.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Minimum search length must be at least 1")]
    InvalidSearchLength,

    #[error("Requested length {requested} is below the indexed minimum search length {minimum}")]
    MinimumLengthBelowSeed { requested: usize, minimum: usize },

    #[error("Fragment of length {fragment_length} is shorter than the requested minimum {minimum_length}")]
    FragmentTooShort {
        fragment_length: usize,
        minimum_length: usize,
    },

    #[error("A genome named '{0}' is already registered")]
    DuplicateGenome(String),

    #[error("No match found")]
    NoMatch,

    #[error("Index error: {0}")]
    Index(#[from] TrieError),
}

impl MatchError {
    /// True when the search ran to completion without finding anything
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

/// Location of one indexed seed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SeedHit {
    /// Index into the registered genome list
    genome: usize,
    position: usize,
}

/// Library of genomes indexed for fragment and relatedness searches
///
/// Every window of `min_search_length` bases of every registered genome is stored in a
/// trie. Query methods take `&self` and never touch the index structure, so a built
/// matcher can be shared across threads for read-only searching.
#[derive(Debug, Clone)]
pub struct GenomeMatcher {
    min_search_length: usize,
    genomes: Vec<Genome>,
    name_to_index: HashMap<String, usize>,
    seeds: Trie<SeedHit>,
}

impl GenomeMatcher {
    /// Create an empty matcher indexing seeds of `min_search_length` bases
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidSearchLength` if `min_search_length` is zero.
    pub fn new(min_search_length: usize) -> Result<Self, MatchError> {
        if min_search_length == 0 {
            return Err(MatchError::InvalidSearchLength);
        }

        Ok(Self {
            min_search_length,
            genomes: Vec::new(),
            name_to_index: HashMap::new(),
            seeds: Trie::new(),
        })
    }

    /// Register a genome and index every seed-length window of its sequence
    ///
    /// # Errors
    ///
    /// Returns `MatchError::DuplicateGenome` if a genome with the same name is already
    /// registered; the matcher is left unchanged in that case.
    pub fn add_genome(&mut self, genome: Genome) -> Result<(), MatchError> {
        if self.name_to_index.contains_key(genome.name()) {
            return Err(MatchError::DuplicateGenome(genome.name().to_string()));
        }

        if genome.len() < self.min_search_length {
            warn!(
                "Genome '{}' ({} bp) is shorter than the minimum search length {}; nothing to index",
                genome.name(),
                genome.len(),
                self.min_search_length
            );
        }

        let index = self.genomes.len();
        for (position, window) in genome
            .sequence()
            .as_bytes()
            .windows(self.min_search_length)
            .enumerate()
        {
            self.seeds.insert(
                window,
                SeedHit {
                    genome: index,
                    position,
                },
            )?;
        }

        debug!(
            "Indexed genome '{}' ({} bp); index holds {} seeds in {} nodes",
            genome.name(),
            genome.len(),
            self.seeds.value_count(),
            self.seeds.node_count()
        );

        self.name_to_index.insert(genome.name().to_string(), index);
        self.genomes.push(genome);
        Ok(())
    }

    pub fn minimum_search_length(&self) -> usize {
        self.min_search_length
    }

    /// Registered genomes in registration order
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Look up a registered genome by name
    pub fn genome(&self, name: &str) -> Option<&Genome> {
        self.name_to_index.get(name).map(|&idx| &self.genomes[idx])
    }

    /// Number of registered genomes
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Number of seed windows stored in the index
    pub fn indexed_seed_count(&self) -> usize {
        self.seeds.value_count()
    }

    /// Find where `fragment` occurs in the library and how far each occurrence extends
    ///
    /// Candidates come from the seed index (the first `minimum_search_length()` bases of
    /// the fragment). Each is extended as far as the fragment allows under the match
    /// mode, and only the candidates reaching the longest extension overall are returned,
    /// ordered by genome registration order and then position.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::MinimumLengthBelowSeed` or `MatchError::FragmentTooShort`
    /// for invalid lengths (checked before any searching), or `MatchError::NoMatch`
    /// if no candidate reaches `minimum_length` bases.
    pub fn find_genomes_with_this_dna(
        &self,
        fragment: &str,
        minimum_length: usize,
        exact_match_only: bool,
    ) -> Result<Vec<DnaMatch>, MatchError> {
        let mode = MatchMode::from_exact_only(exact_match_only);
        let longest = self.longest_extensions(fragment.as_bytes(), minimum_length, mode)?;

        Ok(longest
            .into_iter()
            .map(|(hit, length)| {
                DnaMatch::new(self.genomes[hit.genome].name(), hit.position, length)
            })
            .collect())
    }

    /// Score every registered genome against `query`
    ///
    /// The query is cut into consecutive non-overlapping fragments of
    /// `fragment_match_length` bases (a trailing partial fragment is ignored). A genome
    /// scores one hit for each fragment found in it at full length; its percentage is
    /// hits over the number of fragments. Genomes at or above
    /// `match_percent_threshold` are returned in registration order.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::MinimumLengthBelowSeed` if `fragment_match_length` is below
    /// the minimum search length, or `MatchError::NoMatch` if the query yields no
    /// fragments or no genome reaches the threshold.
    pub fn find_related_genomes(
        &self,
        query: &Genome,
        fragment_match_length: usize,
        exact_match_only: bool,
        match_percent_threshold: f64,
    ) -> Result<Vec<GenomeMatch>, MatchError> {
        self.check_minimum_length(fragment_match_length)?;
        let mode = MatchMode::from_exact_only(exact_match_only);

        let fragment_count = query.len() / fragment_match_length;
        if fragment_count == 0 {
            warn!(
                "Query '{}' ({} bp) is shorter than the fragment length {}",
                query.name(),
                query.len(),
                fragment_match_length
            );
            return Err(MatchError::NoMatch);
        }

        let mut hits = vec![0usize; self.genomes.len()];
        for fragment in query
            .sequence()
            .as_bytes()
            .chunks_exact(fragment_match_length)
        {
            let longest = match self.longest_extensions(fragment, fragment_match_length, mode) {
                Ok(longest) => longest,
                Err(MatchError::NoMatch) => continue,
                Err(e) => return Err(e),
            };

            // Sorted by genome, so dedup leaves one entry per genome for this fragment
            let mut matched: Vec<usize> = longest.iter().map(|(hit, _)| hit.genome).collect();
            matched.dedup();
            for genome in matched {
                hits[genome] += 1;
            }
        }

        debug!(
            "Sampled {} fragments of {} bp from '{}' ({} mode)",
            fragment_count,
            fragment_match_length,
            query.name(),
            mode
        );

        let results: Vec<GenomeMatch> = self
            .genomes
            .iter()
            .zip(&hits)
            .filter_map(|(genome, &count)| {
                let percent = 100.0 * count_to_f64(count) / count_to_f64(fragment_count);
                (percent >= match_percent_threshold)
                    .then(|| GenomeMatch::new(genome.name(), percent))
            })
            .collect();

        if results.is_empty() {
            Err(MatchError::NoMatch)
        } else {
            Ok(results)
        }
    }

    fn check_minimum_length(&self, requested: usize) -> Result<(), MatchError> {
        if requested < self.min_search_length {
            return Err(MatchError::MinimumLengthBelowSeed {
                requested,
                minimum: self.min_search_length,
            });
        }
        Ok(())
    }

    /// Seed hits reaching the longest extension of `fragment`, with that length
    fn longest_extensions(
        &self,
        fragment: &[u8],
        minimum_length: usize,
        mode: MatchMode,
    ) -> Result<Vec<(SeedHit, usize)>, MatchError> {
        self.check_minimum_length(minimum_length)?;
        if fragment.len() < minimum_length {
            return Err(MatchError::FragmentTooShort {
                fragment_length: fragment.len(),
                minimum_length,
            });
        }

        let fragment = fragment.to_ascii_uppercase();
        let seed = &fragment[..self.min_search_length];
        let candidates = self.seeds.find(seed, mode.is_exact());

        // Candidates that cannot hold the whole fragment are dropped by the failed extract
        let extended: Vec<(SeedHit, usize)> = candidates
            .into_iter()
            .filter_map(|hit| {
                let target = self.genomes[hit.genome]
                    .extract(hit.position, fragment.len())
                    .ok()?;
                let length = extension_length(target.as_bytes(), &fragment, mode);
                (length >= minimum_length).then_some((hit, length))
            })
            .collect();

        let Some(longest) = extended.iter().map(|&(_, length)| length).max() else {
            return Err(MatchError::NoMatch);
        };

        let mut best: Vec<(SeedHit, usize)> = extended
            .into_iter()
            .filter(|&(_, length)| length == longest)
            .collect();
        best.sort_unstable_by_key(|&(hit, _)| hit);

        debug!(
            "Fragment of {} bp: {} candidates reach the longest extension of {} bp",
            fragment.len(),
            best.len(),
            longest
        );

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome(name: &str, sequence: &str) -> Genome {
        Genome::new(name, sequence).unwrap()
    }

    fn make_matcher(min_search_length: usize, genomes: &[(&str, &str)]) -> GenomeMatcher {
        let mut matcher = GenomeMatcher::new(min_search_length).unwrap();
        for (name, sequence) in genomes {
            matcher.add_genome(genome(name, sequence)).unwrap();
        }
        matcher
    }

    #[test]
    fn test_new_rejects_zero_length() {
        assert_eq!(
            GenomeMatcher::new(0).unwrap_err(),
            MatchError::InvalidSearchLength
        );
        assert_eq!(GenomeMatcher::new(4).unwrap().minimum_search_length(), 4);
    }

    #[test]
    fn test_add_genome_indexes_every_window() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.indexed_seed_count(), 5);
        assert_eq!(matcher.genome("G1").unwrap().sequence(), "ACGTACGT");
        assert!(matcher.genome("G2").is_none());
    }

    #[test]
    fn test_add_genome_shorter_than_seed() {
        let matcher = make_matcher(4, &[("short", "ACG")]);
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.indexed_seed_count(), 0);
        assert_eq!(
            matcher.find_genomes_with_this_dna("ACGT", 4, true),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_add_genome_rejects_duplicate_name() {
        let mut matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let result = matcher.add_genome(genome("G1", "TTTTTTTT"));

        assert_eq!(result, Err(MatchError::DuplicateGenome("G1".to_string())));
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.indexed_seed_count(), 5);
        assert!(matcher.find_genomes_with_this_dna("TTTT", 4, true).is_err());
    }

    #[test]
    fn test_exact_match_includes_ties() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let matches = matcher.find_genomes_with_this_dna("ACGT", 4, true).unwrap();
        assert_eq!(
            matches,
            vec![DnaMatch::new("G1", 0, 4), DnaMatch::new("G1", 4, 4)]
        );
    }

    #[test]
    fn test_one_mismatch_in_seed() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let matches = matcher.find_genomes_with_this_dna("ACGA", 4, false).unwrap();
        assert_eq!(
            matches,
            vec![DnaMatch::new("G1", 0, 4), DnaMatch::new("G1", 4, 4)]
        );
        assert_eq!(
            matcher.find_genomes_with_this_dna("ACGA", 4, true),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_fragment_is_case_insensitive() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let matches = matcher.find_genomes_with_this_dna("acgt", 4, true).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_minimum_length_below_seed_fails() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        assert_eq!(
            matcher.find_genomes_with_this_dna("ACGT", 3, true),
            Err(MatchError::MinimumLengthBelowSeed {
                requested: 3,
                minimum: 4
            })
        );
    }

    #[test]
    fn test_fragment_shorter_than_minimum_fails() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let err = matcher
            .find_genomes_with_this_dna("ACGTA", 6, true)
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::FragmentTooShort {
                fragment_length: 5,
                minimum_length: 6
            }
        );
        assert!(!err.is_no_match());
    }

    #[test]
    fn test_only_longest_extension_is_returned() {
        let matcher = make_matcher(3, &[("G1", "AAACCCGGG"), ("G2", "AAACCCTTT")]);

        let exact = matcher
            .find_genomes_with_this_dna("AAACCCGG", 3, true)
            .unwrap();
        assert_eq!(exact, vec![DnaMatch::new("G1", 0, 8)]);

        let snp = matcher
            .find_genomes_with_this_dna("AAACCCGG", 3, false)
            .unwrap();
        assert_eq!(snp, vec![DnaMatch::new("G1", 0, 8)]);
    }

    #[test]
    fn test_longest_extension_is_independent_of_candidate_order() {
        // The shorter extension (G1) is registered first and must not survive
        let matcher = make_matcher(3, &[("G1", "AAACCCTTT"), ("G2", "AAACCCGGG")]);
        let matches = matcher
            .find_genomes_with_this_dna("AAACCCGGG", 3, true)
            .unwrap();
        assert_eq!(matches, vec![DnaMatch::new("G2", 0, 9)]);
    }

    #[test]
    fn test_mismatch_outside_seed() {
        let matcher = make_matcher(4, &[("G1", "ACGTTTGCAT")]);

        let snp = matcher
            .find_genomes_with_this_dna("ACGTATGCAT", 4, false)
            .unwrap();
        assert_eq!(snp, vec![DnaMatch::new("G1", 0, 10)]);

        let exact = matcher
            .find_genomes_with_this_dna("ACGTATGCAT", 4, true)
            .unwrap();
        assert_eq!(exact, vec![DnaMatch::new("G1", 0, 4)]);
    }

    #[test]
    fn test_single_mismatch_budget_spans_whole_fragment() {
        let matcher = make_matcher(4, &[("G1", "ACGTTTGCAT")]);

        // Mismatches at positions 3 and 4: only the first four bases can match
        let matches = matcher
            .find_genomes_with_this_dna("ACGAATGCAT", 4, false)
            .unwrap();
        assert_eq!(matches, vec![DnaMatch::new("G1", 0, 4)]);

        assert_eq!(
            matcher.find_genomes_with_this_dna("ACGAATGCAT", 6, false),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_candidate_running_past_genome_end_is_dropped() {
        let matcher = make_matcher(4, &[("G1", "ACGTAC")]);
        assert_eq!(
            matcher.find_genomes_with_this_dna("ACGTACGT", 4, true),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_matches_across_genomes() {
        let matcher = make_matcher(4, &[("G1", "GGACGTAA"), ("G2", "ACGTAATT")]);
        let matches = matcher
            .find_genomes_with_this_dna("ACGTAA", 4, true)
            .unwrap();
        assert_eq!(
            matches,
            vec![DnaMatch::new("G1", 2, 6), DnaMatch::new("G2", 0, 6)]
        );
    }

    #[test]
    fn test_queries_are_idempotent() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGTTGCA"), ("G2", "TTGCACGTACGA")]);
        let query = genome("Q", "ACGTACGTTGCA");

        for exact in [true, false] {
            assert_eq!(
                matcher.find_genomes_with_this_dna("ACGTACG", 5, exact),
                matcher.find_genomes_with_this_dna("ACGTACG", 5, exact)
            );
            assert_eq!(
                matcher.find_related_genomes(&query, 4, exact, 0.0),
                matcher.find_related_genomes(&query, 4, exact, 0.0)
            );
        }
    }

    #[test]
    fn test_self_match() {
        let sequence = "TTGACCAGTACGGATCCAGT";
        let matcher = make_matcher(5, &[("G1", sequence)]);
        let g1 = matcher.genome("G1").unwrap();

        for position in 0..=sequence.len() - 5 {
            let window = g1.extract(position, 5).unwrap();
            let matches = matcher.find_genomes_with_this_dna(window, 5, true).unwrap();
            assert!(
                matches
                    .iter()
                    .any(|m| m.genome_name == "G1" && m.position == position && m.length >= 5),
                "window at {position} not found"
            );
        }
    }

    #[test]
    fn test_related_identical_genomes() {
        let sequence = "ACGTTGCAACGGTACA";
        let matcher = make_matcher(
            4,
            &[("G1", sequence), ("copy", sequence), ("G3", "TTTTTTTTTTTT")],
        );
        let query = genome("Q", sequence);

        let related = matcher.find_related_genomes(&query, 4, true, 50.0).unwrap();
        assert_eq!(
            related,
            vec![GenomeMatch::new("G1", 100.0), GenomeMatch::new("copy", 100.0)]
        );
    }

    #[test]
    fn test_related_counts_each_genome_once_per_fragment() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let query = genome("Q", "ACGTACGT");

        let related = matcher.find_related_genomes(&query, 4, true, 0.0).unwrap();
        assert_eq!(related, vec![GenomeMatch::new("G1", 100.0)]);
    }

    #[test]
    fn test_related_skips_trailing_partial_fragment() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);
        let query = genome("Q", "ACGTGGGGA");

        let related = matcher.find_related_genomes(&query, 4, true, 0.0).unwrap();
        assert_eq!(related.len(), 1);
        assert!((related[0].percent_match - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_related_threshold() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT"), ("G2", "GGGGCCCC")]);
        let query = genome("Q", "ACGTGGGG");

        let related = matcher.find_related_genomes(&query, 4, true, 50.0).unwrap();
        assert_eq!(
            related,
            vec![GenomeMatch::new("G1", 50.0), GenomeMatch::new("G2", 50.0)]
        );

        assert_eq!(
            matcher.find_related_genomes(&query, 4, true, 60.0),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_related_with_snp_tolerance() {
        let matcher = make_matcher(4, &[("G1", "ACGTTTGCATGC")]);
        // Each 6 bp fragment carries one substitution after its first base
        let query = genome("Q", "ACGTATGCTTGC");

        assert_eq!(
            matcher.find_related_genomes(&query, 6, true, 0.0).unwrap(),
            vec![GenomeMatch::new("G1", 0.0)]
        );
        assert_eq!(
            matcher.find_related_genomes(&query, 6, false, 0.0).unwrap(),
            vec![GenomeMatch::new("G1", 100.0)]
        );
    }

    #[test]
    fn test_related_invalid_inputs() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGT")]);

        assert_eq!(
            matcher.find_related_genomes(&genome("Q", "ACGTACGT"), 3, true, 0.0),
            Err(MatchError::MinimumLengthBelowSeed {
                requested: 3,
                minimum: 4
            })
        );
        assert_eq!(
            matcher.find_related_genomes(&genome("Q", "ACG"), 4, true, 0.0),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_concurrent_queries() {
        let matcher = make_matcher(4, &[("G1", "ACGTACGTTGCA"), ("G2", "TTGCACGTACGA")]);
        let expected = matcher.find_genomes_with_this_dna("CGTACG", 4, false);
        let shared = &matcher;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(move || shared.find_genomes_with_this_dna("CGTACG", 4, false))
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
