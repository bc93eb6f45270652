//! Precondition checks that run before any search.
//!
//! The search only accepts [`Modulus`] and [`DigitSet`], and this module is
//! the only place that builds them, so invalid input can never reach it.

use crate::{Digit, DigitSet, MAX_SUPPORTED_MODULUS, Modulus, RADIX};
use log::trace;
use std::fmt;

/// Why a (k, S) pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// k was zero or negative.
    InvalidModulus { modulus: i64 },
    /// S had no digits in it.
    EmptyAlphabet,
    /// An element of S was not a decimal digit.
    DigitOutOfRange { digit: i64 },
    /// k is positive but too large to allocate a state per residue.
    ModulusTooLarge { modulus: i64, max: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidModulus { modulus } => {
                write!(f, "Modulus must be positive, got {modulus}")
            }
            ValidationError::EmptyAlphabet => write!(f, "Digit set must not be empty"),
            ValidationError::DigitOutOfRange { digit } => {
                write!(f, "Digit {digit} is outside the range 0..={}", RADIX - 1)
            }
            ValidationError::ModulusTooLarge { modulus, max } => {
                write!(f, "Modulus {modulus} exceeds the supported maximum of {max}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a raw (k, S) pair and convert it into search-ready types.
///
/// Checks run in a fixed order: the modulus first, then whether S is empty,
/// then the range of each digit. The first failing digit is reported.
///
/// # Errors
/// Returns the first [`ValidationError`] found.
pub fn validate(modulus: i64, digits: &[i64]) -> Result<(Modulus, DigitSet), ValidationError> {
    let modulus = validate_modulus(modulus)?;

    if digits.is_empty() {
        return Err(ValidationError::EmptyAlphabet);
    }

    let checked = digits
        .iter()
        .map(|&d| to_digit(d).ok_or(ValidationError::DigitOutOfRange { digit: d }))
        .collect::<Result<Vec<Digit>, _>>()?;
    let digit_set = DigitSet::from_checked(checked);

    trace!("Validated k={modulus}, S={digit_set}");
    Ok((modulus, digit_set))
}

/// Check the modulus on its own.
///
/// # Errors
/// Returns [`ValidationError::InvalidModulus`] for k <= 0 and
/// [`ValidationError::ModulusTooLarge`] above [`MAX_SUPPORTED_MODULUS`].
pub fn validate_modulus(modulus: i64) -> Result<Modulus, ValidationError> {
    if modulus <= 0 {
        return Err(ValidationError::InvalidModulus { modulus });
    }
    match u32::try_from(modulus) {
        Ok(k) if k <= MAX_SUPPORTED_MODULUS => Ok(Modulus::new_unchecked(k)),
        _ => Err(ValidationError::ModulusTooLarge {
            modulus,
            max: MAX_SUPPORTED_MODULUS,
        }),
    }
}

fn to_digit(value: i64) -> Option<Digit> {
    if (0..i64::from(RADIX)).contains(&value) {
        Digit::try_from(value).ok()
    } else {
        None
    }
}
