//! The transition function of the residue automaton.
//!
//! Appending digit `d` to a number whose value is `r` mod k gives a number
//! whose value is `(10r + d)` mod k. The root (residue 0 before any digit has
//! been written) is special: writing a 0 there would be a leading zero, and
//! the "number" 0 it produces is not a positive multiple. That edge simply
//! does not exist in the automaton.

use crate::{Digit, Modulus, RADIX, Residue};

/// The residue of the empty prefix. Also the only accepting residue.
pub const ROOT: Residue = 0;

/// Follow the edge labelled `digit` out of `state`.
///
/// Returns `None` when `state` is the root and `digit` is 0, since no number
/// may start with a leading zero. Every other (state, digit) pair has exactly
/// one successor.
///
/// Callers that are expanding the root must pass [`ROOT`] here and let this
/// function decide. A non-root state that happens to have residue 0 cannot
/// exist, because reaching residue 0 from anywhere else ends the search.
#[must_use]
#[inline]
pub fn step(state: Residue, digit: Digit, modulus: Modulus) -> Option<Residue> {
    if state == ROOT && digit == 0 {
        return None;
    }
    Some(next_residue(state, digit, modulus))
}

/// `(10 * state + digit) mod k` without the leading-zero guard.
///
/// Done in u64 so that `10 * state` cannot overflow for any supported k.
#[must_use]
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn next_residue(state: Residue, digit: Digit, modulus: Modulus) -> Residue {
    let k = u64::from(modulus.get());
    let next = (u64::from(RADIX) * u64::from(state) + u64::from(digit)) % k;
    // next < k <= u32::MAX
    next as Residue
}
