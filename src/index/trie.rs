//! Prefix tree over base sequences with exact and one-mismatch lookup.
//!
//! Nodes live in a single arena vector; children are stored as indices into it,
//! one slot per base. Each node holds the values inserted under the key that ends
//! there, in insertion order.

use thiserror::Error;

use crate::core::base::{Base, ALPHABET_SIZE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("Trie keys must not be empty")]
    EmptyKey,

    #[error("Invalid key symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
}

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Node<V> {
    /// None only on the root
    label: Option<Base>,
    values: Vec<V>,
    children: [Option<NodeId>; ALPHABET_SIZE],
}

impl<V> Node<V> {
    fn new(label: Option<Base>) -> Self {
        Self {
            label,
            values: Vec::new(),
            children: [None; ALPHABET_SIZE],
        }
    }

    fn child(&self, base: Base) -> Option<NodeId> {
        self.children[base.index()]
    }
}

/// Prefix tree mapping base keys to the values inserted under them
#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<Node<V>>,
    value_count: usize,
}

impl<V: Copy> Trie<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None)],
            value_count: 0,
        }
    }

    /// Discard every node and value
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new(None));
        self.value_count = 0;
    }

    /// Append `value` to the node reached by `key`, creating nodes as needed
    ///
    /// # Errors
    ///
    /// Returns `TrieError::EmptyKey` for an empty key or `TrieError::InvalidSymbol`
    /// if the key contains a byte outside ACGTN. The trie is left unchanged on error.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<(), TrieError> {
        let bases = parse_key(key)?;

        let mut current = ROOT;
        for base in bases {
            current = match self.nodes[current].child(base) {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new(Some(base)));
                    self.nodes[current].children[base.index()] = Some(child);
                    child
                }
            };
        }

        self.nodes[current].values.push(value);
        self.value_count += 1;
        Ok(())
    }

    /// Collect the values stored under `key`
    ///
    /// With `exact_only` the key must be present verbatim. Otherwise keys differing
    /// from `key` in at most one position after the first are also visited.
    /// The returned vector is a fresh copy.
    pub fn find(&self, key: &[u8], exact_only: bool) -> Vec<V> {
        if key.is_empty() {
            return Vec::new();
        }

        if exact_only {
            self.find_exact(key)
        } else {
            self.find_one_mismatch(key)
        }
    }

    fn find_exact(&self, key: &[u8]) -> Vec<V> {
        let mut current = ROOT;
        for &byte in key {
            let next = Base::from_ascii(byte).and_then(|base| self.nodes[current].child(base));
            match next {
                Some(child) => current = child,
                None => return Vec::new(),
            }
        }
        self.nodes[current].values.clone()
    }

    fn find_one_mismatch(&self, key: &[u8]) -> Vec<V> {
        let mut found = Vec::new();

        // The first symbol never spends the mismatch budget
        let Some(first) = Base::from_ascii(key[0]).and_then(|base| self.nodes[ROOT].child(base))
        else {
            return found;
        };

        // (node, symbols consumed, mismatch spent)
        let mut stack: Vec<(NodeId, usize, bool)> = vec![(first, 1, false)];

        while let Some((node_id, depth, spent)) = stack.pop() {
            let node = &self.nodes[node_id];

            if depth == key.len() {
                found.extend_from_slice(&node.values);
                continue;
            }

            let wanted = Base::from_ascii(key[depth]);
            for child_id in node.children.iter().flatten().copied() {
                if self.nodes[child_id].label == wanted {
                    stack.push((child_id, depth + 1, spent));
                } else if !spent {
                    stack.push((child_id, depth + 1, true));
                }
            }
        }

        found
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of values inserted since construction or the last reset
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }
}

impl<V: Copy> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_key(key: &[u8]) -> Result<Vec<Base>, TrieError> {
    if key.is_empty() {
        return Err(TrieError::EmptyKey);
    }

    key.iter()
        .enumerate()
        .map(|(position, &byte)| {
            Base::from_ascii(byte).ok_or(TrieError::InvalidSymbol {
                symbol: char::from(byte),
                position,
            })
        })
        .collect()
}
