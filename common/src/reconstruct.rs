//! Turn a finished search tree back into the digits of the multiple.

use crate::search::{SearchTree, TerminalEdge};
use crate::transition::ROOT;
use crate::{Digit, Multiple};

/// Walk parent pointers from the terminal edge back to the root and read off
/// the multiple from left to right.
///
/// Labels are collected from the end of the number towards the start, so the
/// collected digits are reversed before the terminal digit is appended.
///
/// # Panics
/// Panics if the tree is malformed: a non-root state on the chain without a
/// parent or label, or a chain longer than the number of states (a cycle).
/// [`crate::search::search`] never builds such a tree.
#[must_use]
pub fn reconstruct(tree: &SearchTree, terminal: TerminalEdge) -> Multiple {
    let mut digits: Vec<Digit> = Vec::new();
    let mut curr = terminal.from;

    while curr != ROOT {
        let label = tree
            .label(curr)
            .expect("every non-root state on the path should have a label");
        digits.push(label);
        curr = tree
            .parent(curr)
            .expect("every non-root state on the path should have a parent");
        assert!(
            digits.len() <= tree.num_states(),
            "parent chain is longer than the number of states"
        );
    }

    digits.reverse();
    digits.push(terminal.digit);

    debug_assert_ne!(digits.first(), Some(&0), "multiple has a leading zero");
    Multiple::from_digits(&digits)
}
