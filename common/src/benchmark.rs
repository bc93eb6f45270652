//! A module with some fixed cases for offline benchmarking.

use crate::SearchCase;
use clap::ValueEnum;
use std::fmt;

/// Different benchmark cases.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BenchmarkMode {
    /// The textbook example: k=26147 with digits {1, 3}.
    Default,
    /// Binary digits only: k=92917 with digits {0, 1}.
    Binary,
    /// A case with no solution: k=1355 with digits {1, 3, 7}.
    /// Every multiple of 1355 ends in 0 or 5, so the whole reachable state
    /// space is exhausted.
    Unsolvable,
    /// A larger modulus: k=9999991 with digits {0, 1}.
    Large,
    /// A repdigit case whose answer is millions of digits long:
    /// k=5000011 with digits {7}.
    LongMultiple,
    /// Close to the largest supported modulus: k=99999989 with digits {1, 3}.
    /// Allocates around a gigabyte.
    Massive,
}

/// Get a benchmark case for testing and performance evaluation.
#[must_use]
pub fn get_benchmark_case(mode: BenchmarkMode) -> SearchCase {
    let (modulus, digits) = match mode {
        BenchmarkMode::Default => (26147, vec![1, 3]),
        BenchmarkMode::Binary => (92917, vec![0, 1]),
        BenchmarkMode::Unsolvable => (1355, vec![1, 3, 7]),
        BenchmarkMode::Large => (9_999_991, vec![0, 1]),
        BenchmarkMode::LongMultiple => (5_000_011, vec![7]),
        BenchmarkMode::Massive => (99_999_989, vec![1, 3]),
    };
    SearchCase::new(modulus, digits)
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test_log::test]
    fn test_get_benchmark_case() {
        assert_eq!(
            get_benchmark_case(BenchmarkMode::Default),
            SearchCase::new(26147, vec![1, 3])
        );
        assert_eq!(
            get_benchmark_case(BenchmarkMode::Unsolvable),
            SearchCase::new(1355, vec![1, 3, 7])
        );
    }

    #[test_log::test]
    fn test_all_benchmark_cases_validate() {
        for mode in BenchmarkMode::value_variants() {
            let case = get_benchmark_case(*mode);
            assert!(
                validate(case.modulus, &case.digits).is_ok(),
                "Benchmark {mode} should be valid input"
            );
        }
    }
}
