//! Breadth-first search for the smallest multiple over the residue automaton.
//!
//! The automaton has exactly k states (the residues mod k). State 0 is both
//! where every number starts (the empty prefix) and where every multiple of k
//! ends. Finding the smallest multiple written in digits from S is therefore
//! the same as finding the shortest path over S that leaves state 0 and
//! returns to it, with ties broken by the smallest digit string.
//!
//! ## Why BFS gives the smallest number
//!
//! 1. States come off the frontier in order of path length, so the first time
//!    state 0 is re-entered it is by a path of minimal length. Among positive
//!    integers without leading zeros, fewer digits always means smaller.
//! 2. Each state is expanded trying digits in ascending order, and each state
//!    keeps only the first path that reached it. Within one BFS layer states
//!    are therefore ordered by the digit strings that reached them, and a
//!    later, lexicographically larger, path to an already-visited state can
//!    never produce a smaller multiple than the earlier one.
//!
//! The ascending order comes from [`DigitSet`], which is sorted at
//! validation. Nothing here re-sorts.
//!
//! ## Complexity
//!
//! Each residue is enqueued at most once and each expansion tries |S| digits,
//! so the search evaluates at most k·|S| transitions and holds O(k) memory.

use crate::reconstruct::reconstruct;
use crate::transition::{ROOT, step};
use crate::validate::{ValidationError, validate};
use crate::{Digit, DigitSet, Modulus, Residue, SearchOutcome};
use log::{debug, trace};
use serde::Serialize;
use std::collections::VecDeque;

/// Counters describing how much of the automaton a search touched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States reached for the first time, not counting the root
    pub states_discovered: u64,

    /// States taken off the frontier and expanded, including the root
    pub states_expanded: u64,

    /// Transitions evaluated
    pub transitions: u64,

    /// Transitions skipped because they would write a leading zero
    pub leading_zeros_skipped: u64,

    /// Length of the multiple found, if any
    pub solution_len: Option<usize>,
}

impl SearchStats {
    fn new() -> Self {
        Self::default()
    }

    fn log_summary(&self, modulus: Modulus) {
        #[allow(clippy::cast_precision_loss)]
        let coverage = 100.0 * (self.states_discovered + 1) as f64 / modulus.get() as f64;
        debug!(
            "Search k={} stats: discovered={} ({:.1}% of states), expanded={}, transitions={}, leading_zeros={}, solution_len={:?}",
            modulus,
            self.states_discovered,
            coverage,
            self.states_expanded,
            self.transitions,
            self.leading_zeros_skipped,
            self.solution_len
        );
    }
}

/// The edge that re-entered the accepting state and ended the search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TerminalEdge {
    /// The state the final digit was appended to
    pub from: Residue,
    /// The final digit of the multiple
    pub digit: Digit,
}

/// Shortest-path tree over the residues, stored as flat arrays indexed by
/// residue. A state's parent is just another index, so walking back to the
/// root is a chain of array lookups.
#[derive(Debug, Clone)]
pub struct SearchTree {
    visited: Vec<bool>,
    parent: Vec<Option<Residue>>,
    label: Vec<Option<Digit>>,
}

impl SearchTree {
    /// A tree holding only the root.
    #[must_use]
    pub fn new(modulus: Modulus) -> Self {
        let n = modulus.num_states();
        let mut visited = vec![false; n];
        visited[ROOT as usize] = true;
        Self {
            visited,
            parent: vec![None; n],
            label: vec![None; n],
        }
    }

    /// Record that `state` was reached from `parent` by appending `digit`.
    ///
    /// Returns `false` and changes nothing if `state` was already visited:
    /// the first path to reach a state is the one kept.
    pub fn discover(&mut self, state: Residue, parent: Residue, digit: Digit) -> bool {
        let i = state as usize;
        if self.visited[i] {
            return false;
        }
        self.visited[i] = true;
        self.parent[i] = Some(parent);
        self.label[i] = Some(digit);
        true
    }

    #[must_use]
    pub fn is_visited(&self, state: Residue) -> bool {
        self.visited[state as usize]
    }

    /// The state `state` was first reached from. `None` for the root and for
    /// states the search never reached.
    #[must_use]
    pub fn parent(&self, state: Residue) -> Option<Residue> {
        self.parent[state as usize]
    }

    /// The digit appended on the edge that first reached `state`.
    #[must_use]
    pub fn label(&self, state: Residue) -> Option<Digit> {
        self.label[state as usize]
    }

    #[must_use]
    pub fn num_states(&self) -> usize {
        self.visited.len()
    }
}

/// Working state for one search. Dropped when the search returns.
struct Searcher<'a> {
    modulus: Modulus,
    digits: &'a DigitSet,
    tree: SearchTree,
    frontier: VecDeque<Residue>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    fn new(modulus: Modulus, digits: &'a DigitSet) -> Self {
        Self {
            modulus,
            digits,
            tree: SearchTree::new(modulus),
            frontier: VecDeque::new(),
            stats: SearchStats::new(),
        }
    }

    /// Try every digit from `curr` in ascending order. Newly reached states go
    /// on the back of the frontier. Stops at the first edge into the
    /// accepting state and returns it.
    fn expand(&mut self, curr: Residue) -> Option<TerminalEdge> {
        self.stats.states_expanded += 1;
        for &digit in self.digits.digits() {
            self.stats.transitions += 1;
            let Some(next) = step(curr, digit, self.modulus) else {
                self.stats.leading_zeros_skipped += 1;
                continue;
            };
            if next == ROOT {
                trace!("Accepting state reached from {curr} via digit {digit}");
                return Some(TerminalEdge { from: curr, digit });
            }
            if self.tree.discover(next, curr, digit) {
                self.stats.states_discovered += 1;
                self.frontier.push_back(next);
            }
        }
        None
    }

    fn run(&mut self) -> Option<TerminalEdge> {
        // Expanding the root seeds the frontier with every valid first digit.
        // A one-digit multiple (like 3 for k=3) is found right here.
        if let Some(edge) = self.expand(ROOT) {
            return Some(edge);
        }
        while let Some(curr) = self.frontier.pop_front() {
            if let Some(edge) = self.expand(curr) {
                return Some(edge);
            }
        }
        None
    }
}

/// Find the smallest positive multiple of `modulus` written only with digits
/// from `digits`.
#[must_use]
pub fn search(modulus: Modulus, digits: &DigitSet) -> SearchOutcome {
    search_with_stats(modulus, digits).0
}

/// Same as [`search`], also returning counters about the traversal.
#[must_use]
pub fn search_with_stats(modulus: Modulus, digits: &DigitSet) -> (SearchOutcome, SearchStats) {
    let mut searcher = Searcher::new(modulus, digits);
    let terminal = searcher.run();

    let outcome = match terminal {
        Some(edge) => SearchOutcome::Found(reconstruct(&searcher.tree, edge)),
        None => SearchOutcome::NoSolution,
    };
    searcher.stats.solution_len = outcome.multiple().map(crate::Multiple::len);
    searcher.stats.log_summary(modulus);

    (outcome, searcher.stats)
}

/// Validate a raw (k, S) pair and search it.
///
/// # Errors
/// Returns a [`ValidationError`] without searching if k or S is invalid.
/// Running out of states is not an error; it comes back as
/// `Ok(SearchOutcome::NoSolution)`.
pub fn find_min_multiple(modulus: i64, digits: &[i64]) -> Result<SearchOutcome, ValidationError> {
    let (modulus, digits) = validate(modulus, digits)?;
    Ok(search(modulus, &digits))
}
