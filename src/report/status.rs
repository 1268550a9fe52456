//! Supporter lifecycle status
//!
//! This module classifies supporters month by month from their payment
//! history: whether a supporter is new, active, lapsed, or lost as of a
//! given date, and how many months expired before a lapsed supporter
//! returned. The returning-supporters report drives these classifications
//! over every month in its range.
//!
//! # Model
//!
//! A supporter's type (`Monthly`, `Annual`, ...) is the suffix after the
//! last `:` of the program on their most recent payment that carries a
//! program. The lapse date is the last payment date plus one month for
//! monthly supporters or twelve months otherwise, rounded up to the first
//! of the following month. A supporter a year or more past their lapse
//! date is lost; past it at all, lapsed.

use crate::report::months;
use crate::types::LedgerEntry;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Days past the lapse date after which a supporter counts as lost
const LOST_AFTER_DAYS: i64 = 365;

/// Supporter classification as of a report month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupporterStatus {
    /// First payment falls within the report month
    New,
    /// Paid up: the lapse date is still in the future
    Active,
    /// Past the lapse date, but less than a year past it
    Lapsed,
    /// A year or more past the lapse date
    Lost,
}

/// One payment in a supporter's history
///
/// The status model only looks at when a payment happened and which program
/// it was under; amounts play no part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryPayment {
    date: NaiveDate,
    program: String,
}

/// One supporter's payments, ordered by date
///
/// Ledger order breaks date ties, so histories are deterministic for any
/// input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHistory {
    /// Opaque entity key this history belongs to
    pub entity: String,

    /// Payments sorted by date, ledger order within a date
    payments: Vec<HistoryPayment>,
}

impl PaymentHistory {
    fn new(entity: &str) -> Self {
        PaymentHistory {
            entity: entity.to_string(),
            payments: Vec::new(),
        }
    }

    /// The payments made up to and including `as_of`
    fn up_to(&self, as_of: NaiveDate) -> &[HistoryPayment] {
        let end = self.payments.partition_point(|payment| payment.date <= as_of);
        &self.payments[..end]
    }

    /// Whether any payment's program ends with the given `:`-prefixed marker
    fn has_program_suffix(&self, marker: &str) -> bool {
        self.payments
            .iter()
            .any(|payment| payment.program.ends_with(marker))
    }

    /// The supporter's type as of a date
    ///
    /// The suffix after the last `:` of the most recent payment that has a
    /// program; `None` when no payment up to `as_of` carries one.
    pub fn supporter_type(&self, as_of: NaiveDate) -> Option<&str> {
        latest_program_suffix(self.up_to(as_of))
    }

    /// Classify the supporter as of a date
    ///
    /// Returns `None` when the supporter has no payments up to `as_of`.
    pub fn status(&self, as_of: NaiveDate) -> Option<SupporterStatus> {
        let payments = self.up_to(as_of);
        let (first, last) = match (payments.first(), payments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return None,
        };

        let lapse = lapse_date(last.date, latest_program_suffix(payments));
        let days_past_due = (as_of - lapse).num_days();
        let status = if days_past_due >= LOST_AFTER_DAYS {
            SupporterStatus::Lost
        } else if days_past_due >= 0 {
            SupporterStatus::Lapsed
        } else if within_report_month(first.date, as_of) {
            SupporterStatus::New
        } else {
            SupporterStatus::Active
        };
        Some(status)
    }

    /// How many months expired before the supporter returned this month
    ///
    /// Zero unless the most recent payment falls within the report month
    /// and lands strictly after the lapse date computed from the payment
    /// before it; then the count of whole months between that lapse date
    /// and the payment month, plus one (paying in the lapse month itself
    /// still counts as one expired month).
    pub fn months_expired_at_return(&self, as_of: NaiveDate) -> u32 {
        let payments = self.up_to(as_of);
        let (first, last) = match (payments.first(), payments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0,
        };

        if within_report_month(first.date, as_of) {
            // Started paying this month, so not a return.
            return 0;
        }
        if !within_report_month(last.date, as_of) {
            // No payment this month: lapsed, lost, or an annual supporter
            // partway through their year.
            return 0;
        }

        // first lies outside the report month and last inside it, so at
        // least two payments exist.
        let previous = match payments.iter().rev().nth(1) {
            Some(previous) => previous,
            None => return 0,
        };
        let past_lapse = lapse_date(previous.date, latest_program_suffix(payments));
        if last.date <= past_lapse {
            // Paid on or before the lapse date: a renewal, not a return.
            return 0;
        }

        let elapsed = (i64::from(last.date.year()) * 12 + i64::from(last.date.month()))
            - (i64::from(past_lapse.year()) * 12 + i64::from(past_lapse.month()))
            + 1;
        elapsed.max(0) as u32
    }
}

/// The suffix after the last `:` of the most recent payment with a program
fn latest_program_suffix(payments: &[HistoryPayment]) -> Option<&str> {
    payments
        .iter()
        .rev()
        .find(|payment| !payment.program.is_empty())
        .and_then(|payment| payment.program.rsplit(':').next())
}

/// The date a supporter's most recent payment stops covering them
///
/// One month of cover for monthly supporters, twelve for everyone else,
/// rounded up to the first of the following month.
fn lapse_date(last_payment: NaiveDate, supporter_type: Option<&str>) -> NaiveDate {
    let covered_until = match supporter_type {
        Some("Monthly") => months::next_month(last_payment),
        _ => months::next_year(last_payment),
    };
    months::round_month_up(covered_until)
}

/// Whether a date falls within the report month ending at `as_of`
///
/// The window runs from just after the first of the previous month up to
/// and including `as_of` itself, so a report month starting on the first
/// covers the whole preceding month.
fn within_report_month(date: NaiveDate, as_of: NaiveDate) -> bool {
    months::adjust_month(as_of, -1, Some(1)) < date && date <= as_of
}

/// Payment histories for every entity in a ledger
///
/// Groups parsed ledger entries by entity, keeping first-seen entity order
/// so report populations iterate deterministically.
#[derive(Debug, Clone, Default)]
pub struct SupporterHistories {
    histories: HashMap<String, PaymentHistory>,
    order: Vec<String>,
}

impl SupporterHistories {
    /// Group ledger entries into per-entity histories
    pub fn build(entries: &[LedgerEntry]) -> Self {
        let mut histories: HashMap<String, PaymentHistory> = HashMap::new();
        let mut order = Vec::new();
        for entry in entries {
            if !histories.contains_key(&entry.entity) {
                order.push(entry.entity.clone());
            }
            histories
                .entry(entry.entity.clone())
                .or_insert_with(|| PaymentHistory::new(&entry.entity))
                .payments
                .push(HistoryPayment {
                    date: entry.date,
                    program: entry.program.clone(),
                });
        }
        for history in histories.values_mut() {
            // Stable sort, so ledger order survives within a date.
            history.payments.sort_by_key(|payment| payment.date);
        }
        SupporterHistories { histories, order }
    }

    /// The history for one entity, if it made any payments
    pub fn get(&self, entity: &str) -> Option<&PaymentHistory> {
        self.histories.get(entity)
    }

    /// Number of entities with payment histories
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the ledger held no payments at all
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The earliest payment date across all histories
    pub fn earliest_payment_date(&self) -> Option<NaiveDate> {
        self.histories
            .values()
            .filter_map(|history| history.payments.first())
            .map(|payment| payment.date)
            .min()
    }

    /// Histories whose entities ever paid under a program of the given type
    ///
    /// A history qualifies when any of its payments has a program ending in
    /// `:` followed by the type. Histories come back in first-seen entity
    /// order. An entity paying under both annual and monthly programs shows
    /// up for both types.
    pub fn with_program_suffix<'a>(
        &'a self,
        supporter_type: &str,
    ) -> impl Iterator<Item = &'a PaymentHistory> + 'a {
        let marker = format!(":{}", supporter_type);
        self.order
            .iter()
            .filter_map(move |entity| self.histories.get(entity))
            .filter(move |history| history.has_program_suffix(&marker))
    }
}
