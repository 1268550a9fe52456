//! Streaming reader for ledger rows
//!
//! Provides an iterator over raw ledger rows from any byte source. The
//! ledger format is headerless CSV with exactly four fields per row:
//! entity key, date, amount, program.
//!
//! # Design
//!
//! The reader wraps `csv::Reader` and deserializes one row per iteration,
//! so memory use stays constant regardless of ledger size. Field
//! whitespace is trimmed at this layer; date and amount stay raw text
//! here and are parsed by the importer, which owns the error context for
//! bad values.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `open()`
//! - Row-level CSV errors are yielded as `Err` items with the line number

use crate::types::{LedgerRow, ReportError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming ledger row reader
///
/// Implements `Iterator`, yielding one `Result<LedgerRow, ReportError>`
/// per CSV row.
#[derive(Debug)]
pub struct LedgerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl LedgerReader<File> {
    /// Open a ledger file for streaming iteration
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the headerless ledger CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerReader)` - If the file opened successfully
    /// * `Err(ReportError)` - `FileNotFound` for a missing path, `IoError`
    ///   for any other open failure
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        let file = File::open(path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::from(error),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> LedgerReader<R> {
    /// Wrap any byte source in a ledger reader
    ///
    /// Used directly for ledger-command output, which arrives as captured
    /// stdout rather than a file.
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(source);
        LedgerReader { reader }
    }
}

impl<R: Read> Iterator for LedgerReader<R> {
    type Item = Result<LedgerRow, ReportError>;

    /// Get the next raw row from the ledger
    ///
    /// # Returns
    ///
    /// * `Some(Ok(LedgerRow))` - Successfully read row
    /// * `Some(Err(ReportError))` - CSV-level error with line context
    /// * `None` - End of input
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<LedgerRow>();

        match deserializer.next()? {
            Ok(row) => Some(Ok(row)),
            Err(error) => Some(Err(ReportError::from(error))),
        }
    }
}
