//! A simple CLI for the digitmult library.

#![warn(clippy::all, clippy::pedantic)]

extern crate digitmult_common;
use digitmult_common::batch::{CaseReport, CaseStatus, RunOptions, load_cases, run_case, summarize};
use digitmult_common::benchmark::{BenchmarkMode, get_benchmark_case};
use digitmult_common::checker::quotient;
use digitmult_common::{CLIENT_VERSION, Multiple, SearchCase, validate};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use rayon::prelude::*;
use simple_tqdm::ParTqdm;
use std::path::PathBuf;

/// Multiples longer than this are abbreviated unless `--full` is set.
const PREVIEW_DIGITS: usize = 120;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// The number the result must be a multiple of
    #[arg(short = 'k', long, allow_negative_numbers = true, env = "DIGITMULT_MODULUS")]
    modulus: Option<i64>,

    /// The allowed digits, comma separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_value = "0,1",
        env = "DIGITMULT_DIGITS"
    )]
    digits: Vec<i64>,

    /// Read a JSON array of cases from this file instead
    #[arg(short, long, env = "DIGITMULT_CASES")]
    cases: Option<PathBuf>,

    /// Run an offline benchmark case instead
    #[arg(short, long, env = "DIGITMULT_BENCHMARK")]
    benchmark: Option<BenchmarkMode>,

    /// Run cases in parallel with this many threads
    #[arg(short, long, default_value_t = 4, env = "DIGITMULT_THREADS")]
    threads: usize,

    /// Re-check every multiple found for divisibility and allowed digits
    #[arg(long, env = "DIGITMULT_VERIFY")]
    verify: bool,

    /// Compare against brute-force enumeration up to this many digits
    #[arg(long, num_args = 0..=1, default_missing_value = "9", env = "DIGITMULT_CROSS_CHECK")]
    cross_check: Option<usize>,

    /// Print results as JSON
    #[arg(long, env = "DIGITMULT_JSON")]
    json: bool,

    /// Print long multiples in full
    #[arg(long, env = "DIGITMULT_FULL")]
    full: bool,

    /// Suppress all output except the results
    #[arg(short, long, env = "DIGITMULT_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "DIGITMULT_VERBOSE")]
    verbose: bool,
}

/// Work out which cases to run from the flags. A case file wins over a
/// benchmark, which wins over `-k`.
fn collect_cases(cli: &Cli) -> Result<Vec<SearchCase>> {
    if let Some(path) = &cli.cases {
        return load_cases(path);
    }
    if let Some(benchmark) = cli.benchmark {
        return Ok(vec![get_benchmark_case(benchmark)]);
    }
    match cli.modulus {
        Some(modulus) => Ok(vec![SearchCase::new(modulus, cli.digits.clone())]),
        None => bail!("Nothing to do: pass a modulus with -k, a --cases file, or a --benchmark"),
    }
}

/// Abbreviate very long multiples for the terminal.
fn preview(multiple: &Multiple, full: bool) -> String {
    let s = multiple.as_str();
    if full || s.len() <= PREVIEW_DIGITS {
        return s.to_string();
    }
    let half = PREVIEW_DIGITS / 2;
    format!("{}...{}", &s[..half], &s[s.len() - half..])
}

/// How many reports ran a shorter cross-check than was asked for.
fn reduced_cross_checks(reports: &[CaseReport], requested: usize) -> usize {
    reports
        .iter()
        .filter(|r| r.cross_check_len.is_some_and(|len| len < requested))
        .count()
}

fn print_report(report: &CaseReport, cli: &Cli) {
    let case = &report.case;
    if cli.quiet {
        match (&report.status, &report.multiple, &report.error) {
            (CaseStatus::Found, Some(m), _) => println!("{}", preview(m, cli.full)),
            (CaseStatus::Invalid, _, Some(e)) => println!("invalid input: {e}"),
            _ => println!("no solution"),
        }
        return;
    }

    match (&report.status, &report.multiple, &report.error) {
        (CaseStatus::Found, Some(m), _) => {
            println!("{case}: N = {} ({} digits)", preview(m, cli.full), m.len());
        }
        (CaseStatus::Invalid, _, Some(e)) => println!("{case}: invalid input: {e}"),
        _ => println!("{case}: no solution"),
    }

    #[allow(clippy::cast_precision_loss)]
    let elapsed_ms = report.elapsed_micros as f64 / 1000.0;
    println!("  Time: {elapsed_ms:.3}ms");

    if let Some(verified) = report.verified {
        println!("  Verified: {}", if verified { "ok" } else { "FAILED" });
    }
    if let (Some(cross_checked), Some(max_len)) = (report.cross_checked, report.cross_check_len) {
        println!(
            "  Brute-force cross-check (up to {max_len} digits): {}",
            if cross_checked { "ok" } else { "FAILED" }
        );
    }

    if cli.verbose {
        if let Some(stats) = &report.stats {
            println!("  Stats: {stats:?}");
        }
        if let (Some(m), Ok((modulus, _))) =
            (&report.multiple, validate(case.modulus, &case.digits))
        {
            if let Some(q) = quotient(m, modulus) {
                println!("  Multiplier: N / {modulus} = {q}");
            }
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    if !cli.quiet && !cli.json {
        println!(
            "Digitmult Client v{} started, using {} threads.",
            CLIENT_VERSION, cli.threads
        );
    }
    if cli.verbose {
        println!("CLI Inputs: {cli:?}");
    }

    let cases = collect_cases(&cli)?;
    info!("Loaded {} case(s)", cases.len());

    // Configure Rayon for batch processing
    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
        .context("Failed to build the thread pool")?;

    let options = RunOptions {
        verify: cli.verify,
        cross_check: cli.cross_check,
    };

    // Configure TQDM
    let tqdm_config = simple_tqdm::Config::new()
        .with_unit("cases".to_string())
        .with_disable(cli.quiet || cli.json || cases.len() < 2);

    // Every case is independent; collect keeps input order
    let reports: Vec<CaseReport> = cases
        .par_iter()
        .tqdm_config(tqdm_config)
        .map(|case| run_case(case, options))
        .collect();

    let summary = summarize(&reports);

    if let Some(requested) = cli.cross_check {
        let reduced = reduced_cross_checks(&reports, requested);
        if reduced > 0 && !cli.quiet {
            eprintln!(
                "Warning: cross-check limited below {requested} digits for {reduced} case(s) with large digit sets."
            );
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize results")?
        );
    } else {
        for report in &reports {
            print_report(report, &cli);
        }
        if reports.len() > 1 && !cli.quiet {
            println!(
                "Done: {} cases, {} found, {} without solution, {} invalid.",
                summary.total, summary.found, summary.no_solution, summary.invalid
            );
        }
    }

    if summary.failed_checks > 0 {
        eprintln!("{} case(s) failed verification.", summary.failed_checks);
        std::process::exit(1);
    }
    // A single invalid case is a usage error
    if reports.len() == 1 && summary.invalid == 1 {
        std::process::exit(2);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_digits() {
        let cli = Cli::try_parse_from(["digitmult", "-k", "26147", "-d", "1,3"]).unwrap();
        assert_eq!(cli.modulus, Some(26147));
        assert_eq!(cli.digits, vec![1, 3]);
        assert_eq!(
            collect_cases(&cli).unwrap(),
            vec![SearchCase::new(26147, vec![1, 3])]
        );
    }

    #[test]
    fn test_cli_passes_bad_input_through_to_validation() {
        let cli = Cli::try_parse_from(["digitmult", "-k", "-5", "-d", "3,-1"]).unwrap();
        assert_eq!(cli.modulus, Some(-5));
        assert_eq!(cli.digits, vec![3, -1]);
    }

    #[test]
    fn test_cli_benchmark() {
        let cli = Cli::try_parse_from(["digitmult", "--benchmark", "unsolvable"]).unwrap();
        assert_eq!(
            collect_cases(&cli).unwrap(),
            vec![SearchCase::new(1355, vec![1, 3, 7])]
        );
    }

    #[test]
    fn test_cli_cross_check_default() {
        let cli = Cli::try_parse_from(["digitmult", "-k", "7", "--cross-check"]).unwrap();
        assert_eq!(cli.cross_check, Some(9));
        let cli = Cli::try_parse_from(["digitmult", "-k", "7", "--cross-check", "5"]).unwrap();
        assert_eq!(cli.cross_check, Some(5));
    }

    #[test]
    fn test_reduced_cross_checks() {
        let options = RunOptions {
            verify: false,
            cross_check: Some(9),
        };
        let reports: Vec<CaseReport> = [
            SearchCase::new(7, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]),
            SearchCase::new(7, vec![0, 1]),
            SearchCase::new(0, vec![1]),
        ]
        .iter()
        .map(|c| run_case(c, options))
        .collect();
        assert_eq!(reduced_cross_checks(&reports, 9), 1);
        assert_eq!(reduced_cross_checks(&reports, 7), 0);
    }

    #[test]
    fn test_preview() {
        let short = digitmult_common::find_min_multiple(7, &[0, 1])
            .unwrap()
            .into_multiple()
            .unwrap();
        assert_eq!(preview(&short, false), "1001");

        // 252 ones
        let long = digitmult_common::find_min_multiple(1009, &[1])
            .unwrap()
            .into_multiple()
            .unwrap();
        assert_eq!(long.len(), 252);
        let ones = "1".repeat(PREVIEW_DIGITS / 2);
        assert_eq!(preview(&long, false), format!("{ones}...{ones}"));
        assert_eq!(preview(&long, true), "1".repeat(252));
    }
}
