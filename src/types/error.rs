//! Error types for the supporter report
//!
//! This module defines all error types that can occur while building a
//! report. Errors are designed to be descriptive and user-friendly for CLI
//! output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Ledger Errors**: Malformed rows, bad dates or amounts, a failing
//!   ledger command
//! - **Criteria Errors**: Malformed or unrecognized filter criteria
//! - **Range Errors**: Impossible month ranges, an empty ledger where a
//!   range must be inferred

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the supporter report
///
/// This enum represents all possible errors that can occur while importing
/// the input feeds and writing a report. Each variant includes relevant
/// context to help diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Ledger row failed to parse as CSV
    ///
    /// This is a fatal error: the run aborts rather than report totals from
    /// a partial ledger.
    #[error("Ledger parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    LedgerParse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Payment date did not parse as an ISO calendar date
    ///
    /// This is a fatal error: a misdated payment would corrupt the
    /// first/last aggregates for its entity.
    #[error("Invalid payment date '{value}' for entity {entity}")]
    InvalidDate {
        /// Entity key of the affected row
        entity: String,
        /// The unparseable date text
        value: String,
    },

    /// Payment amount did not parse as a decimal quantity
    ///
    /// This is a fatal error: a dropped amount would understate the
    /// entity's payment total.
    #[error("Invalid amount '{value}' for entity {entity}")]
    InvalidAmount {
        /// Entity key of the affected row
        entity: String,
        /// The unparseable amount text
        value: String,
    },

    /// Filter criterion is structurally malformed
    ///
    /// Criteria are validated before any input is read, so this error is
    /// reported without doing any aggregation work.
    #[error("Invalid criterion '{criterion}': {reason}")]
    InvalidCriterion {
        /// The criterion as given on the command line
        criterion: String,
        /// What is wrong with it
        reason: String,
    },

    /// Filter criterion names a key this tool does not understand
    ///
    /// Reported before any input is read, like all criteria errors.
    #[error("Unknown criterion key '{key}' in '{criterion}'")]
    UnknownCriterion {
        /// The unrecognized key
        key: String,
        /// The criterion as given on the command line
        criterion: String,
    },

    /// Ledger command failed to run or exited nonzero
    ///
    /// This is a fatal error: without the ledger there is nothing to
    /// report.
    #[error("Ledger command '{command}' failed: {message}")]
    LedgerCommand {
        /// The command line that was run
        command: String,
        /// Exit status or spawn failure description
        message: String,
    },

    /// Requested month range ends before it starts
    #[error("End month {} is before start month {}", end.format("%Y-%m"), start.format("%Y-%m"))]
    MonthRange {
        /// First month of the requested range
        start: NaiveDate,
        /// Last month of the requested range
        end: NaiveDate,
    },

    /// Ledger holds no payments and no explicit range was given
    ///
    /// The returning-supporters report infers its start month from the
    /// earliest payment, which an empty ledger cannot provide.
    #[error("Ledger holds no payments; cannot infer a report range")]
    EmptyLedger,

    /// Arithmetic overflow in an entity's payment total
    ///
    /// This is a fatal error: the total would be wrong for every row after
    /// the overflow.
    #[error("Arithmetic overflow in payment total for entity {entity}")]
    TotalOverflow {
        /// Entity key whose total overflowed
        entity: String,
    },
}

// Conversion from io::Error to ReportError
impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        ReportError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ReportError
impl From<csv::Error> for ReportError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        ReportError::LedgerParse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ReportError {
    /// Create an InvalidDate error
    pub fn invalid_date(entity: &str, value: &str) -> Self {
        ReportError::InvalidDate {
            entity: entity.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(entity: &str, value: &str) -> Self {
        ReportError::InvalidAmount {
            entity: entity.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidCriterion error
    pub fn invalid_criterion(criterion: &str, reason: &str) -> Self {
        ReportError::InvalidCriterion {
            criterion: criterion.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an UnknownCriterion error
    pub fn unknown_criterion(key: &str, criterion: &str) -> Self {
        ReportError::UnknownCriterion {
            key: key.to_string(),
            criterion: criterion.to_string(),
        }
    }

    /// Create a LedgerCommand error
    pub fn ledger_command(command: &str, message: &str) -> Self {
        ReportError::LedgerCommand {
            command: command.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MonthRange error
    pub fn month_range(start: NaiveDate, end: NaiveDate) -> Self {
        ReportError::MonthRange { start, end }
    }

    /// Create a TotalOverflow error
    pub fn total_overflow(entity: &str) -> Self {
        ReportError::TotalOverflow {
            entity: entity.to_string(),
        }
    }
}
