//! A naive enumerator used to cross-check the search on small inputs.
//!
//! Candidates are generated shortest first and, within a length, in
//! lexicographic order, so the first multiple found is the smallest one of at
//! most `max_len` digits. The cost is |S|^len per length, so keep `max_len`
//! small.

use crate::transition::{ROOT, next_residue};
use crate::{Digit, DigitSet, Modulus, Multiple};
use itertools::Itertools;
use log::{trace, warn};

/// Default length cap used by `--cross-check` in the client.
pub const DEFAULT_MAX_LEN: usize = 9;

/// Upper bound on the candidates a single cross-check may enumerate.
pub const MAX_CANDIDATES: u64 = 10_000_000;

/// Number of candidates enumerated when nothing is found, |S| + |S|^2 + ...
/// + |S|^max_len. Counts leading-zero candidates too since they are still
/// generated before being filtered. Saturates instead of overflowing.
#[must_use]
pub fn candidate_count(digits: &DigitSet, max_len: usize) -> u64 {
    let base = digits.len() as u64;
    let mut total: u64 = 0;
    let mut layer: u64 = 1;
    for _ in 0..max_len {
        layer = layer.saturating_mul(base);
        total = total.saturating_add(layer);
    }
    total
}

/// The longest cap no greater than `requested` whose worst case stays within
/// [`MAX_CANDIDATES`].
#[must_use]
pub fn capped_max_len(digits: &DigitSet, requested: usize) -> usize {
    let mut len = requested;
    while len > 0 && candidate_count(digits, len) > MAX_CANDIDATES {
        len -= 1;
    }
    if len < requested {
        warn!(
            "Cross-check for S={digits} capped at {len} digits instead of {requested} ({} candidates would be too many)",
            candidate_count(digits, requested)
        );
    }
    len
}

/// Smallest multiple of `modulus` with at most `max_len` digits from `digits`.
///
/// `None` means there is no such multiple within the cap, not that there is
/// no multiple at all.
#[must_use]
pub fn brute_force_min_multiple(
    modulus: Modulus,
    digits: &DigitSet,
    max_len: usize,
) -> Option<Multiple> {
    for len in 1..=max_len {
        let hit = std::iter::repeat_n(digits.digits().iter().copied(), len)
            .multi_cartesian_product()
            .filter(|candidate| candidate[0] != 0)
            .find(|candidate| residue(candidate, modulus) == 0);
        if let Some(candidate) = hit {
            trace!("Brute force found a {len}-digit multiple of {modulus}");
            return Some(Multiple::from_digits(&candidate));
        }
    }
    None
}

fn residue(candidate: &[Digit], modulus: Modulus) -> u32 {
    candidate
        .iter()
        .fold(ROOT, |acc, &d| next_residue(acc, d, modulus))
}

/// Whether the search and the brute-force enumerator agree on (k, S), given
/// the length cap.
///
/// If the search found a multiple no longer than `max_len`, the enumerator
/// must find exactly the same one. Otherwise the enumerator must find nothing.
#[must_use]
pub fn agrees_with_search(
    modulus: Modulus,
    digits: &DigitSet,
    found: Option<&Multiple>,
    max_len: usize,
) -> bool {
    let brute = brute_force_min_multiple(modulus, digits, max_len);
    match found {
        Some(m) if m.len() <= max_len => brute.as_ref() == Some(m),
        _ => brute.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search;
    use crate::validate::validate;

    #[test_log::test]
    fn test_brute_force_known() {
        let (k, s) = validate(7, &[0, 1]).unwrap();
        assert_eq!(
            brute_force_min_multiple(k, &s, 6).map(|m| m.to_string()),
            Some("1001".to_string())
        );

        let (k, s) = validate(6, &[4, 3]).unwrap();
        assert_eq!(
            brute_force_min_multiple(k, &s, 4).map(|m| m.to_string()),
            Some("444".to_string())
        );
    }

    #[test_log::test]
    fn test_brute_force_respects_cap() {
        let (k, s) = validate(7, &[1]).unwrap();
        // 111111 is the first, six digits long
        assert_eq!(brute_force_min_multiple(k, &s, 5), None);
        assert!(brute_force_min_multiple(k, &s, 6).is_some());
    }

    #[test_log::test]
    fn test_brute_force_never_uses_leading_zero() {
        let (k, s) = validate(3, &[0]).unwrap();
        assert_eq!(brute_force_min_multiple(k, &s, 6), None);
    }

    #[test_log::test]
    fn test_candidate_count() {
        let (_, s) = validate(1, &[0, 1]).unwrap();
        assert_eq!(candidate_count(&s, 3), 2 + 4 + 8);
        assert_eq!(candidate_count(&s, 0), 0);

        let (_, s) = validate(1, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(candidate_count(&s, 100), u64::MAX);
    }

    #[test_log::test]
    fn test_capped_max_len() {
        let (_, binary) = validate(1, &[0, 1]).unwrap();
        assert_eq!(capped_max_len(&binary, DEFAULT_MAX_LEN), DEFAULT_MAX_LEN);

        // 9 + 81 + ... + 9^9 is about 4.4e8, 9^1..9^7 is about 5.4e6
        let (_, nonzero) = validate(1, &[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(capped_max_len(&nonzero, DEFAULT_MAX_LEN), 7);
        assert!(candidate_count(&nonzero, 7) <= MAX_CANDIDATES);

        let (_, all) = validate(1, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(capped_max_len(&all, DEFAULT_MAX_LEN), 6);
        assert_eq!(capped_max_len(&all, 3), 3);
        assert_eq!(capped_max_len(&all, 0), 0);
    }

    #[test_log::test]
    fn test_search_matches_brute_force_for_small_moduli() {
        let digit_sets: [&[i64]; 9] = [
            &[1],
            &[0, 1],
            &[3, 7],
            &[2, 4, 6, 8],
            &[5],
            &[0],
            &[1, 3],
            &[9, 8],
            &[0, 5],
        ];
        for modulus in 1..60 {
            for digits in digit_sets {
                let (k, s) = validate(modulus, digits).unwrap();
                let outcome = search(k, &s);
                assert!(
                    agrees_with_search(k, &s, outcome.multiple(), 7),
                    "Search and brute force disagree for k={modulus}, S={s}: {outcome}"
                );
            }
        }
    }
}
