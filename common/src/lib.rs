//! A library with common utilities for finding the smallest positive multiple
//! of a number that can be written using only a restricted set of digits.
//!
//! Multiples of `k` are modelled as paths through an implicit automaton whose
//! states are the residues mod `k`. Appending a digit `d` to a number with
//! residue `r` moves it to residue `(10r + d) mod k`, so the smallest multiple
//! is the shortest (then lexicographically smallest) path that leaves residue
//! 0 and comes back to it. See [`search`] for the details.

pub mod batch;
pub mod benchmark;
pub mod brute_force;
pub mod checker;
pub mod reconstruct;
pub mod search;
pub mod transition;
pub mod validate;

pub use search::find_min_multiple;
pub use validate::{ValidationError, validate};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The numeric base every multiple is written in.
pub const RADIX: u32 = 10;

/// The largest modulus we will search. The search keeps a few bytes of state
/// for every residue, so this caps memory at around a gigabyte.
pub const MAX_SUPPORTED_MODULUS: u32 = 100_000_000;

/// A single decimal digit, 0 through 9.
pub type Digit = u8;

/// A residue mod k. Residue 0 is both the start and the accepting state.
pub type Residue = u32;

/// A modulus that has passed validation: `1 <= k <= MAX_SUPPORTED_MODULUS`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Modulus(u32);

impl Modulus {
    /// Only the validator hands these out.
    pub(crate) fn new_unchecked(k: u32) -> Self {
        Self(k)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of residues (and so the number of states in the automaton).
    #[must_use]
    pub fn num_states(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated digit alphabet: non-empty, every digit in 0..=9, sorted
/// ascending with no duplicates.
///
/// The ascending order is load-bearing. The search tries digits in the order
/// they are stored here, and that order is what makes the first multiple it
/// finds the lexicographically smallest among those of the same length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitSet(Vec<Digit>);

impl DigitSet {
    /// Sorts and deduplicates. Callers must have range-checked the digits.
    pub(crate) fn from_checked<I: IntoIterator<Item = Digit>>(digits: I) -> Self {
        Self(digits.into_iter().sorted_unstable().dedup().collect())
    }

    /// The digits in ascending order.
    #[must_use]
    pub fn digits(&self) -> &[Digit] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, digit: Digit) -> bool {
        self.0.binary_search(&digit).is_ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The smallest digit that can start a number, if any.
    #[must_use]
    pub fn smallest_nonzero(&self) -> Option<Digit> {
        self.0.iter().copied().find(|&d| d != 0)
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

/// A positive multiple written as a decimal string with no leading zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Multiple(String);

impl Multiple {
    pub(crate) fn from_digits(digits: &[Digit]) -> Self {
        Self(digits.iter().map(|&d| char::from(b'0' + d)).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of decimal digits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Multiple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Multiple {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The result of a search over valid input. `NoSolution` is a real answer,
/// not an error: it means no positive multiple of k uses only these digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Multiple),
    NoSolution,
}

impl SearchOutcome {
    #[must_use]
    pub fn multiple(&self) -> Option<&Multiple> {
        match self {
            SearchOutcome::Found(m) => Some(m),
            SearchOutcome::NoSolution => None,
        }
    }

    #[must_use]
    pub fn into_multiple(self) -> Option<Multiple> {
        match self {
            SearchOutcome::Found(m) => Some(m),
            SearchOutcome::NoSolution => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchOutcome::Found(m) => write!(f, "{m}"),
            SearchOutcome::NoSolution => write!(f, "no solution"),
        }
    }
}

/// One unvalidated (k, S) pair, as read from a case file or the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCase {
    pub modulus: i64,
    pub digits: Vec<i64>,
}

impl SearchCase {
    #[must_use]
    pub fn new(modulus: i64, digits: Vec<i64>) -> Self {
        Self { modulus, digits }
    }
}

impl fmt::Display for SearchCase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "k={}, S={{{}}}", self.modulus, self.digits.iter().join(", "))
    }
}
