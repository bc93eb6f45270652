//! Independent verification of a search result.
//!
//! Multiples can be far longer than any fixed-width integer (k=1234567 with
//! S={1,2} already gives 16 digits, and larger k easily run into hundreds),
//! so divisibility is checked by folding the residue one digit at a time
//! instead of parsing the number.

use crate::{DigitSet, Modulus, Multiple, RADIX, Residue};
use malachite::base::num::arithmetic::traits::DivRem;
use malachite::base::num::basic::traits::Zero;
use malachite::natural::Natural;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Why a digit string could not be checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The string had no characters.
    Empty,
    /// The string contained something other than 0-9.
    NotADigit { position: usize, found: char },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Empty => write!(f, "Cannot check an empty digit string"),
            CheckError::NotADigit { position, found } => {
                write!(f, "Character {found:?} at position {position} is not a digit")
            }
        }
    }
}

impl std::error::Error for CheckError {}

/// Compute `number mod k` for a decimal string of any length.
///
/// # Errors
/// Returns [`CheckError`] if the string is empty or contains a non-digit.
pub fn residue_of(number: &str, modulus: Modulus) -> Result<Residue, CheckError> {
    if number.is_empty() {
        return Err(CheckError::Empty);
    }
    let k = u64::from(modulus.get());
    let mut acc: u64 = 0;
    for (position, c) in number.chars().enumerate() {
        let digit = c
            .to_digit(RADIX)
            .ok_or(CheckError::NotADigit { position, found: c })?;
        acc = (acc * u64::from(RADIX) + u64::from(digit)) % k;
    }
    // acc < k <= u32::MAX
    #[allow(clippy::cast_possible_truncation)]
    Ok(acc as Residue)
}

/// Whether a decimal string is divisible by k.
///
/// # Errors
/// Returns [`CheckError`] if the string is empty or contains a non-digit.
pub fn is_multiple_of(number: &str, modulus: Modulus) -> Result<bool, CheckError> {
    Ok(residue_of(number, modulus)? == 0)
}

/// Whether every character of the string is a digit in the set.
#[must_use]
pub fn uses_only(number: &str, digits: &DigitSet) -> bool {
    number.chars().all(|c| {
        c.to_digit(RADIX)
            .and_then(|d| u8::try_from(d).ok())
            .is_some_and(|d| digits.contains(d))
    })
}

/// Everything we can say about a claimed multiple without re-running the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// `N mod k == 0`
    pub divisible: bool,
    /// Every digit of N is in S
    pub digits_allowed: bool,
    /// N does not start with 0
    pub no_leading_zero: bool,
}

impl CheckReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.divisible && self.digits_allowed && self.no_leading_zero
    }
}

/// Check a multiple against the (k, S) it was searched for.
#[must_use]
pub fn check_multiple(multiple: &Multiple, modulus: Modulus, digits: &DigitSet) -> CheckReport {
    let s = multiple.as_str();
    CheckReport {
        // Only an empty or non-digit string fails to fold, and neither is a
        // multiple of anything
        divisible: is_multiple_of(s, modulus).is_ok_and(|divisible| divisible),
        digits_allowed: uses_only(s, digits),
        no_leading_zero: !s.starts_with('0'),
    }
}

/// The multiplier `N / k` as an arbitrary-precision integer.
///
/// Returns `None` if `N` is not a multiple of k.
#[must_use]
pub fn quotient(multiple: &Multiple, modulus: Modulus) -> Option<Natural> {
    let n = Natural::from_str(multiple.as_str()).ok()?;
    let (q, r) = n.div_rem(Natural::from(modulus.get()));
    if r == Natural::ZERO { Some(q) } else { None }
}
