//! Returning-supporters report
//!
//! Walks the report range month by month and writes one CSV row per month:
//! how many supporters were new that month, and how many returned after
//! their cover expired, bucketed by how long they had been expired. The
//! populations are supporters who ever paid under an annual or a monthly
//! program; a supporter holding both counts once per type.

use crate::report::months;
use crate::report::status::{SupporterHistories, SupporterStatus};
use crate::types::ReportError;
use chrono::NaiveDate;
use std::io::Write;

/// Supporter types the report counts
const REPORTED_TYPES: [&str; 2] = ["Annual", "Monthly"];

/// Report column titles
const RETURNING_HEADER: [&str; 7] = [
    "Month",
    "Total New",
    "Were 0-3mo expired",
    "Were 3-6mo expired",
    "Were 6-9mo expired",
    "Were 9-12mo expired",
    "Were >1yr expired",
];

/// Write the returning-supporters report for a month range
///
/// Emits the header row and one row per month from `start` through `end`
/// inclusive, then flushes. The first row reports as of `start` itself
/// (which may fall mid-month); every later row reports as of the first of
/// its month. The sink stays open; closing it is the caller's job.
///
/// # Arguments
///
/// * `histories` - Per-entity payment histories built from the ledger
/// * `start` - First report date; its month labels the first row
/// * `end` - Last report month, inclusive; must not precede `start`
/// * `output` - The sink to write CSV to
///
/// # Errors
///
/// Returns an `IoError` if writing to or flushing the sink fails.
pub fn write_returning_report(
    histories: &SupporterHistories,
    start: NaiveDate,
    end: NaiveDate,
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(RETURNING_HEADER)
        .map_err(|e| ReportError::IoError {
            message: format!("Failed to write returning report header: {}", e),
        })?;

    let mut month = start;
    while month <= end {
        writer
            .write_record(month_row(histories, month))
            .map_err(|e| ReportError::IoError {
                message: format!("Failed to write returning report row: {}", e),
            })?;
        month = months::round_month_up(month);
    }

    writer.flush().map_err(|e| ReportError::IoError {
        message: format!("Failed to flush returning report output: {}", e),
    })?;
    Ok(())
}

/// Build the report row for one month
///
/// Counts supporters with status `New` and, for returns, buckets
/// `months_expired_at_return` into quarters capped at the fifth bucket
/// (more than a year). Bucket zero holds everyone who did not return this
/// month and is not reported.
fn month_row(histories: &SupporterHistories, month: NaiveDate) -> Vec<String> {
    let mut new_supporters: u64 = 0;
    let mut expired_buckets = [0u64; 6];

    for supporter_type in REPORTED_TYPES {
        for history in histories.with_program_suffix(supporter_type) {
            if history.status(month) == Some(SupporterStatus::New) {
                new_supporters += 1;
            }
            let months_expired = history.months_expired_at_return(month);
            let bucket = ((months_expired + 2) / 3).min(5) as usize;
            expired_buckets[bucket] += 1;
        }
    }

    let mut row = vec![
        month.format("%Y-%m").to_string(),
        new_supporters.to_string(),
    ];
    row.extend(expired_buckets[1..].iter().map(u64::to_string));
    row
}
