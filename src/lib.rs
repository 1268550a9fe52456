//! Supporter Report Library
//!
//! # Overview
//!
//! This library reconciles two independently-maintained records of the same
//! donors, a contact-detail feed and a payment ledger, into per-supporter
//! aggregates, selects supporters with `key=value` criteria, and renders CSV
//! reports.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (SupporterRecord, LedgerEntry, ReportError)
//! - [`cli`] - CLI argument parsing
//! - `core` - Business logic components:
//!   - [`cache`](crate::core::cache) - Deduplicating per-entity record store
//!   - [`contact_importer`](crate::core::contact_importer) - Contact block resolution and merging
//!   - [`ledger_importer`](crate::core::ledger_importer) - Ledger row parsing and payment folding
//!   - [`filter`](crate::core::filter) - Criteria parsing and record predicates
//! - [`reference`] - Embedded country and region lookup tables
//! - [`io`] - Feed readers, the report writer, and the ledger subprocess
//! - [`report`] - Month arithmetic and the returning-supporters report
//! - [`pipeline`] - End-to-end report runs
//!
//! # Reports
//!
//! Two reports are supported:
//!
//! - **Supporter report**: one row per supporter passing the criteria, with
//!   contact attributes and payment aggregates (count, exact total, program
//!   set, first/last payment snapshots)
//! - **Returning supporters**: one row per month counting supporters whose
//!   first payment fell in that month and supporters who came back after
//!   their cover expired, bucketed by how long they were expired
//!
//! # Filtering
//!
//! Criteria are `key=value` pairs combined with AND. The `region` and
//! `country` keys resolve their value against embedded reference tables, so
//! `state=KY` matches supporters recorded under either the code or the full
//! state name; `since` keeps supporters whose most recent payment is on or
//! after the given date. A record must always have a non-empty entity key.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod types;

pub use crate::core::{ContactImporter, EntityResolver, FieldResolver, FilterSet, SupporterCache};
pub use io::write_report;
pub use pipeline::{run_report, run_returning, LedgerSource};
pub use types::{ContactBlock, LedgerEntry, LedgerRow, ReportError, SupporterRecord};
