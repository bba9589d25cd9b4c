use serde::{Deserialize, Serialize};

/// Number of symbols in the supported alphabet
pub const ALPHABET_SIZE: usize = 5;

/// A nucleotide base, including `N` for an unknown base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    A,
    C,
    G,
    T,
    N,
}

impl Base {
    /// All bases in index order
    pub const ALL: [Base; ALPHABET_SIZE] = [Base::A, Base::C, Base::G, Base::T, Base::N];

    /// Parse an ASCII byte, accepting either case
    #[must_use]
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte.to_ascii_uppercase() {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            b'N' => Some(Self::N),
            _ => None,
        }
    }

    /// Dense index in `0..ALPHABET_SIZE`
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
            Self::N => 4,
        }
    }

    /// Upper-case ASCII representation
    #[must_use]
    pub fn to_ascii(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
            Self::N => b'N',
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(self.to_ascii()))
    }
}
