//! Ledger subprocess boundary
//!
//! The ledger usually lives behind an external ledger-processing tool
//! rather than a flat file. This module runs that tool, captures its
//! stdout, and hands the bytes to the same streaming [`LedgerReader`]
//! used for files, so the rest of the pipeline cannot tell the two
//! sources apart.
//!
//! The command string is split on whitespace; no shell is involved, so
//! shell quoting and expansion do not apply.

use crate::io::LedgerReader;
use crate::types::ReportError;
use std::io::Cursor;
use std::process::Command;

/// Run a ledger command and wrap its stdout in a reader
///
/// # Arguments
///
/// * `command` - The program and its arguments as one whitespace-separated
///   string, e.g. `fetch-ledger --all`
///
/// # Returns
///
/// * `Ok(LedgerReader)` - Over the captured stdout of the command
/// * `Err(ReportError)` - If the command is empty, cannot be spawned, or
///   exits nonzero
///
/// # Errors
///
/// A nonzero exit is an error even if the command produced output: a
/// half-written ledger must not silently become a report.
pub fn run_ledger_command(command: &str) -> Result<LedgerReader<Cursor<Vec<u8>>>, ReportError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ReportError::ledger_command(command, "empty command"))?;

    let output = Command::new(program)
        .args(parts)
        .output()
        .map_err(|error| ReportError::ledger_command(command, &error.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim().lines().next() {
            Some(first_line) => format!("{}: {}", output.status, first_line),
            None => output.status.to_string(),
        };
        return Err(ReportError::ledger_command(command, &message));
    }

    Ok(LedgerReader::from_reader(Cursor::new(output.stdout)))
}
