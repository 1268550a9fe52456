//! Report pipeline orchestration
//!
//! This module wires the building blocks into complete report runs. It
//! coordinates between the feed readers (contact blocks and ledger rows),
//! the importers that fold them into the supporter cache, the filter
//! engine, and the report writers.
//!
//! # Design
//!
//! The pipeline focuses on orchestration, delegating:
//! - Contact parsing to `ContactReader` and `ContactImporter`
//! - Ledger parsing to `LedgerReader` and the `ledger_importer` functions
//! - Criteria evaluation to `FilterSet`
//! - CSV output to `report_writer` and the returning report
//!
//! # Error Handling
//!
//! Criteria are validated before any input is read, so a bad criterion is
//! reported without doing any aggregation work. Ledger errors are fatal:
//! a malformed row aborts the run before anything is written, rather than
//! reporting totals from a partial ledger. Contact-feed oddities are
//! tolerated by the importer and never abort a run.

use crate::core::{ledger_importer, ContactImporter, FieldResolver, FilterSet, SupporterCache};
use crate::io::{run_ledger_command, write_report, ContactReader, LedgerReader};
use crate::report::{write_returning_report, SupporterHistories};
use crate::types::{LedgerRow, ReportError};
use chrono::{Local, NaiveDate};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where ledger rows come from
///
/// Either a CSV file on disk or the standard output of an external ledger
/// tool. Both produce the same row stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSource {
    /// Read rows from a file
    File(PathBuf),
    /// Spawn a command and read rows from its stdout
    Command(String),
}

impl LedgerSource {
    /// Open the source and return its ledger row stream
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing file, or `LedgerCommand` when
    /// the external tool cannot be spawned or exits nonzero.
    pub fn rows(&self) -> Result<Box<dyn Iterator<Item = Result<LedgerRow, ReportError>>>, ReportError> {
        match self {
            LedgerSource::File(path) => Ok(Box::new(LedgerReader::open(path)?)),
            LedgerSource::Command(command) => Ok(Box::new(run_ledger_command(command)?)),
        }
    }
}

/// Run the supporter report
///
/// Validates the criteria, merges the contact feed (when given) and the
/// payment ledger into one supporter cache, then writes the report rows
/// for every supporter passing the criteria.
///
/// # Arguments
///
/// * `contacts` - Optional path to the contact-detail feed
/// * `ledger` - Where to read ledger rows from
/// * `criteria` - `KEY=VALUE` filter criteria, applied as a conjunction
/// * `output` - The sink to write the report CSV to
///
/// # Errors
///
/// Returns a criteria error before reading any input, a `FileNotFound` or
/// `LedgerCommand` error if a source cannot be opened, and a fatal parse
/// error if a ledger row is malformed. Nothing is written unless the whole
/// ledger imported cleanly.
pub fn run_report(
    contacts: Option<&Path>,
    ledger: &LedgerSource,
    criteria: &[String],
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    let filters = FilterSet::parse(criteria)?;

    let mut cache = SupporterCache::new();

    if let Some(path) = contacts {
        let blocks = ContactReader::open(path)?.read_blocks()?;
        let importer = ContactImporter::new(FieldResolver);
        let merged = importer.import(&mut cache, &blocks);
        info!("merged {} contact blocks from {}", merged, path.display());
    }

    let mut rows: u64 = 0;
    for row in ledger.rows()? {
        ledger_importer::import(&mut cache, &row?)?;
        rows += 1;
    }
    info!("folded {} ledger rows into {} supporters", rows, cache.len());

    write_report(filters.apply(cache.iter()), output)
}

/// Run the returning-supporters report
///
/// Parses the whole ledger into per-entity payment histories and writes
/// one row per month from the start month through the end month.
///
/// # Arguments
///
/// * `ledger` - Where to read ledger rows from
/// * `start_month` - First report month; defaults to the earliest payment
///   date in the ledger
/// * `end_month` - Last report month, inclusive; defaults to the current
///   month
/// * `output` - The sink to write the report CSV to
///
/// # Errors
///
/// Returns `EmptyLedger` when the start month must be inferred from a
/// ledger with no payments, and `MonthRange` when the end month precedes
/// the start month, besides the source and parse errors of `run_report`.
pub fn run_returning(
    ledger: &LedgerSource,
    start_month: Option<NaiveDate>,
    end_month: Option<NaiveDate>,
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    let mut entries = Vec::new();
    for row in ledger.rows()? {
        entries.push(ledger_importer::parse_entry(&row?)?);
    }
    let histories = SupporterHistories::build(&entries);

    let start = match start_month {
        Some(month) => month,
        None => histories
            .earliest_payment_date()
            .ok_or(ReportError::EmptyLedger)?,
    };
    let end = end_month.unwrap_or_else(|| Local::now().date_naive());
    if end < start {
        return Err(ReportError::month_range(start, end));
    }

    info!(
        "reporting returning supporters for {} entities, {} through {}",
        histories.len(),
        start.format("%Y-%m"),
        end.format("%Y-%m")
    );
    write_returning_report(&histories, start, end, output)
}
