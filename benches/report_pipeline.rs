//! Benchmark suite for the report pipeline
//!
//! Measures end-to-end report generation over synthetic ledgers of several
//! sizes using the divan benchmarking framework. Ledger files are written
//! to temporary storage before timing starts; only the pipeline itself is
//! measured.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use supporter_report::pipeline::{run_report, run_returning, LedgerSource};

fn main() {
    divan::main();
}

const PROGRAMS: [&str; 4] = [
    "Supporter:Monthly",
    "Supporter:Annual",
    "Gift",
    "Capital:Campaign",
];

/// Write a synthetic ledger with `rows` payments spread over 2020-2024
///
/// Roughly ten payments accumulate per entity, so the cache does real
/// aggregation work instead of inserting a fresh record per row.
fn synthetic_ledger(rows: usize) -> NamedTempFile {
    let entities = rows / 10 + 1;
    let mut file = NamedTempFile::new().expect("Failed to create temp ledger");
    for n in 0..rows {
        writeln!(
            file,
            "entity-{},{:04}-{:02}-{:02},${}.{:02},{}",
            n % entities,
            2020 + n % 5,
            n % 12 + 1,
            n % 28 + 1,
            5 + n % 200,
            n % 100,
            PROGRAMS[n % PROGRAMS.len()],
        )
        .expect("Failed to write ledger row");
    }
    file.flush().expect("Failed to flush ledger");
    file
}

fn bench_report(bencher: divan::Bencher, rows: usize, criteria: &[&str]) {
    let ledger_file = synthetic_ledger(rows);
    let ledger = LedgerSource::File(ledger_file.path().to_path_buf());
    let criteria: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();

    bencher.bench_local(|| {
        let mut output = Vec::new();
        run_report(None, &ledger, &criteria, &mut output).expect("Report failed");
        output
    });
}

/// Benchmark the unfiltered report with a small ledger (100 payments)
#[divan::bench]
fn report_small(bencher: divan::Bencher) {
    bench_report(bencher, 100, &[]);
}

/// Benchmark the unfiltered report with a medium ledger (1,000 payments)
#[divan::bench]
fn report_medium(bencher: divan::Bencher) {
    bench_report(bencher, 1_000, &[]);
}

/// Benchmark the unfiltered report with a large ledger (10,000 payments)
#[divan::bench]
fn report_large(bencher: divan::Bencher) {
    bench_report(bencher, 10_000, &[]);
}

/// Benchmark a filtered report with a medium ledger (1,000 payments)
#[divan::bench]
fn filtered_report_medium(bencher: divan::Bencher) {
    bench_report(bencher, 1_000, &["since=2022-01-01"]);
}

/// Benchmark the returning-supporters report with a medium ledger (1,000 payments)
#[divan::bench]
fn returning_report_medium(bencher: divan::Bencher) {
    let ledger_file = synthetic_ledger(1_000);
    let ledger = LedgerSource::File(ledger_file.path().to_path_buf());
    let start = NaiveDate::from_ymd_opt(2020, 1, 1);
    let end = NaiveDate::from_ymd_opt(2024, 12, 1);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        run_returning(&ledger, start, end, &mut output).expect("Report failed");
        output
    });
}
