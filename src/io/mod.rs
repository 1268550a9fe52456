//! I/O module
//!
//! Handles feed parsing and report output.
//!
//! # Components
//!
//! - `contact_reader` - Block parser for the `Key: value` contact feed
//! - `ledger_reader` - Streaming reader for headerless ledger CSV
//! - `subprocess` - Runs the external ledger tool and captures its output
//! - `report_writer` - Report column projection and CSV output

pub mod contact_reader;
pub mod ledger_reader;
pub mod report_writer;
pub mod subprocess;

pub use contact_reader::ContactReader;
pub use ledger_reader::LedgerReader;
pub use report_writer::{format_currency, write_report, ReportColumn, REPORT_COLUMNS};
pub use subprocess::run_ledger_command;
