//! Running many independent (k, S) cases and reporting on them.
//!
//! Every case gets its own search with its own state, so callers are free to
//! run them in parallel (the client does, with rayon). Nothing here depends
//! on the order cases are run in.

use crate::brute_force::{agrees_with_search, capped_max_len};
use crate::checker::check_multiple;
use crate::search::{SearchStats, search_with_stats};
use crate::validate::validate;
use crate::{Multiple, SearchCase, SearchOutcome};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// What happened to a case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Found,
    NoSolution,
    Invalid,
}

/// Extra work to do after each search.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Re-check divisibility and digits of every multiple found
    pub verify: bool,
    /// Compare against brute-force enumeration up to this many digits, lowered
    /// per case if |S| would make that too expensive
    pub cross_check: Option<usize>,
}

/// The result of one case, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub case: SearchCase,
    pub status: CaseStatus,
    pub multiple: Option<Multiple>,
    pub num_digits: Option<usize>,
    pub error: Option<String>,
    pub verified: Option<bool>,
    pub cross_checked: Option<bool>,
    /// Digit cap the cross-check actually used
    pub cross_check_len: Option<usize>,
    pub stats: Option<SearchStats>,
    pub elapsed_micros: u128,
}

impl CaseReport {
    /// False only if a requested check ran and failed.
    #[must_use]
    pub fn checks_passed(&self) -> bool {
        self.verified != Some(false) && self.cross_checked != Some(false)
    }
}

/// Validate, search and optionally check a single case.
#[must_use]
pub fn run_case(case: &SearchCase, options: RunOptions) -> CaseReport {
    let start_time = Instant::now();

    let (modulus, digits) = match validate(case.modulus, &case.digits) {
        Ok(valid) => valid,
        Err(e) => {
            debug!("Rejected {case}: {e}");
            return CaseReport {
                case: case.clone(),
                status: CaseStatus::Invalid,
                multiple: None,
                num_digits: None,
                error: Some(e.to_string()),
                verified: None,
                cross_checked: None,
                cross_check_len: None,
                stats: None,
                elapsed_micros: start_time.elapsed().as_micros(),
            };
        }
    };

    let (outcome, stats) = search_with_stats(modulus, &digits);

    let verified = match (&outcome, options.verify) {
        (SearchOutcome::Found(m), true) => Some(check_multiple(m, modulus, &digits).passed()),
        _ => None,
    };
    let cross_check_len = options
        .cross_check
        .map(|requested| capped_max_len(&digits, requested));
    let cross_checked = cross_check_len
        .map(|max_len| agrees_with_search(modulus, &digits, outcome.multiple(), max_len));

    if verified == Some(false) {
        warn!("Verification failed for {case}: {outcome}");
    }
    if cross_checked == Some(false) {
        warn!("Brute force disagrees with search for {case}: {outcome}");
    }

    let status = match outcome {
        SearchOutcome::Found(_) => CaseStatus::Found,
        SearchOutcome::NoSolution => CaseStatus::NoSolution,
    };
    let multiple = outcome.into_multiple();

    CaseReport {
        case: case.clone(),
        status,
        num_digits: multiple.as_ref().map(Multiple::len),
        multiple,
        error: None,
        verified,
        cross_checked,
        cross_check_len,
        stats: Some(stats),
        elapsed_micros: start_time.elapsed().as_micros(),
    }
}

/// Parse a JSON array of cases, e.g. `[{"modulus": 7, "digits": [0, 1]}]`.
///
/// # Errors
/// Returns an error if the text is not a JSON array of cases.
pub fn parse_cases(json: &str) -> Result<Vec<SearchCase>> {
    serde_json::from_str(json).context("Failed to parse search cases")
}

/// Read and parse a JSON case file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_cases(path: &Path) -> Result<Vec<SearchCase>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file {}", path.display()))?;
    parse_cases(&text).with_context(|| format!("Invalid case file {}", path.display()))
}

/// Totals over a batch of reports.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub found: usize,
    pub no_solution: usize,
    pub invalid: usize,
    pub failed_checks: usize,
}

#[must_use]
pub fn summarize(reports: &[CaseReport]) -> BatchSummary {
    reports.iter().fold(BatchSummary::default(), |mut acc, r| {
        acc.total += 1;
        match r.status {
            CaseStatus::Found => acc.found += 1,
            CaseStatus::NoSolution => acc.no_solution += 1,
            CaseStatus::Invalid => acc.invalid += 1,
        }
        if !r.checks_passed() {
            acc.failed_checks += 1;
        }
        acc
    })
}
