//! Supporter Report CLI
//!
//! Command-line interface for building supporter reports from contact and
//! payment feeds.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- report --contacts contacts.txt --ledger payments.csv > report.csv
//! cargo run -- report --ledger-cmd "fetch-ledger --all" state=KY since=2024-01-01 > report.csv
//! cargo run -- returning --ledger payments.csv --start-month 2023-01 > returning.csv
//! ```
//!
//! The `report` subcommand merges the contact feed (if given) with the
//! payment ledger, keeps supporters matching every `KEY=VALUE` criterion,
//! and writes one CSV row per supporter to stdout. The `returning`
//! subcommand walks the ledger month by month and counts new and returning
//! supporters.
//!
//! Diagnostics are logged through `env_logger`; set `RUST_LOG=debug` to see
//! dropped contact blocks and import counts.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing file, malformed ledger row, invalid criterion, etc.)

use std::process;
use supporter_report::cli;
use supporter_report::pipeline;

fn main() {
    env_logger::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Both reports write to stdout; redirect to capture them
    let mut output = std::io::stdout();
    let result = match args.command {
        cli::Command::Report(report) => pipeline::run_report(
            report.contacts.as_deref(),
            &report.ledger.to_source(),
            &report.criteria,
            &mut output,
        ),
        cli::Command::Returning(returning) => pipeline::run_returning(
            &returning.ledger.to_source(),
            returning.start_month,
            returning.end_month,
            &mut output,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
