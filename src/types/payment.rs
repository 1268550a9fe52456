//! Payment-related types for the supporter report
//!
//! This module defines the ledger row types consumed by the payment importer
//! and the snapshot type recorded on each supporter's aggregates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Raw ledger row as tokenized by the external ledger tool
///
/// Rows arrive as four ordered text fields with no header: entity key,
/// ISO date, currency amount, program identifier. The date and amount are
/// kept as strings here; the payment importer owns the (fatal) parse into
/// typed values.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// Opaque entity key assigned by the entity-resolution service
    pub entity: String,

    /// Payment date in `YYYY-MM-DD` form
    pub date: String,

    /// Payment amount, optionally prefixed with a currency symbol and
    /// containing thousands separators (e.g. `$1,234.56`)
    pub amount: String,

    /// Program identifier the payment was made under
    pub program: String,
}

/// Fully parsed ledger row
///
/// Produced by the payment importer from a [`LedgerRow`]. Amounts are exact
/// decimals; dates are calendar dates. A row that cannot be parsed to this
/// form aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Opaque entity key
    pub entity: String,

    /// Payment date
    pub date: NaiveDate,

    /// Signed payment amount (refunds are negative)
    pub amount: Decimal,

    /// Program identifier
    pub program: String,
}

/// Snapshot of a single payment observation
///
/// Recorded on a supporter for the earliest and most recent payment seen.
/// The fold rules only replace a snapshot on a strictly earlier (first) or
/// strictly later (last) date, so equal dates keep the snapshot that was
/// inserted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSnapshot {
    /// Payment date
    pub date: NaiveDate,

    /// Signed payment amount
    pub amount: Decimal,

    /// Program identifier
    pub program: String,
}

impl PaymentSnapshot {
    /// Build a snapshot from one parsed ledger entry
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        PaymentSnapshot {
            date: entry.date,
            amount: entry.amount,
            program: entry.program.clone(),
        }
    }
}
