//! Seed index used by the genome matcher.
//!
//! - [`Trie`]: prefix tree keyed by base sequences, supporting exact lookup and
//!   lookup tolerating a single substituted base after the first position
//!
//! ## Example
//!
//! ```rust
//! use genome_matcher::index::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert(b"ACGT", 1).unwrap();
//! trie.insert(b"ACGA", 2).unwrap();
//!
//! assert_eq!(trie.find(b"ACGT", true), vec![1]);
//!
//! let mut hits = trie.find(b"ACGT", false);
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 2]);
//! ```

pub mod trie;

pub use trie::{Trie, TrieError};
