//! Payment importer module
//!
//! This module folds raw ledger rows into the supporter cache. Each row
//! carries an entity key, an ISO date, a currency amount, and a program
//! identifier. Unlike the contact feed, the ledger is authoritative
//! financial data: a row that fails to parse is a fatal error for the run,
//! not a skip, because a silently dropped payment would understate totals.

use crate::core::SupporterCache;
use crate::types::{LedgerEntry, LedgerRow, ReportError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a raw ledger row into a typed entry
///
/// # Arguments
///
/// * `row` - The raw row as read from the ledger stream
///
/// # Returns
///
/// * `Ok(LedgerEntry)` - The typed entry with parsed date and amount
/// * `Err(ReportError)` - If the date or amount field is malformed
///
/// # Errors
///
/// Returns an error if:
/// - The date is not a valid `YYYY-MM-DD` calendar date
/// - The amount does not parse as a decimal after currency cleanup
pub fn parse_entry(row: &LedgerRow) -> Result<LedgerEntry, ReportError> {
    Ok(LedgerEntry {
        entity: row.entity.clone(),
        date: parse_date(&row.entity, &row.date)?,
        amount: parse_amount(&row.entity, &row.amount)?,
        program: row.program.clone(),
    })
}

/// Parse a row and fold it into the cache
///
/// The record for the row's entity is created on first reference, so
/// payments for entities the contact feed never mentioned still aggregate
/// (into a record with empty descriptive fields).
///
/// # Arguments
///
/// * `cache` - The supporter cache to fold into
/// * `row` - The raw ledger row
///
/// # Errors
///
/// Returns an error if the row fails to parse or if folding the amount
/// would overflow the entity's running total.
pub fn import(cache: &mut SupporterCache, row: &LedgerRow) -> Result<(), ReportError> {
    let entry = parse_entry(row)?;
    cache.get_or_create(&entry.entity).fold_payment(&entry)
}

fn parse_date(entity: &str, value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ReportError::invalid_date(entity, value))
}

/// Parse a currency amount string into an exact decimal
///
/// Accepts an optional leading sign, an optional `$` symbol, and comma
/// thousands separators: `-$1,234.56` and `$-1,234.56` both parse to the
/// same negative amount.
fn parse_amount(entity: &str, value: &str) -> Result<Decimal, ReportError> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let bare = unsigned.strip_prefix('$').unwrap_or(unsigned);
    let cleaned: String = bare.chars().filter(|&c| c != ',').collect();

    let amount =
        Decimal::from_str(&cleaned).map_err(|_| ReportError::invalid_amount(entity, value))?;
    Ok(if negative { -amount } else { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(entity: &str, date: &str, amount: &str, program: &str) -> LedgerRow {
        LedgerRow {
            entity: entity.to_string(),
            date: date.to_string(),
            amount: amount.to_string(),
            program: program.to_string(),
        }
    }

    #[rstest]
    #[case::plain("10.00", "10.00")]
    #[case::dollar_sign("$10.00", "10.00")]
    #[case::thousands("$1,234.56", "1234.56")]
    #[case::millions("1,000,000.99", "1000000.99")]
    #[case::sign_before_symbol("-$500.00", "-500.00")]
    #[case::sign_after_symbol("$-500.00", "-500.00")]
    #[case::whitespace("  $25.00  ", "25.00")]
    #[case::cents("$0.01", "0.01")]
    #[case::integer("$3", "3")]
    fn test_parse_amount_accepts(#[case] input: &str, #[case] expected: &str) {
        let amount = parse_amount("e", input).unwrap();
        assert_eq!(amount, Decimal::from_str(expected).unwrap());
    }

    #[rstest]
    #[case::words("ten dollars")]
    #[case::empty("")]
    #[case::symbol_only("$")]
    #[case::sign_only("-$")]
    #[case::double_point("12.34.56")]
    fn test_parse_amount_rejects(#[case] input: &str) {
        let error = parse_amount("whitlock-jordan", input).unwrap_err();
        assert!(matches!(error, ReportError::InvalidAmount { .. }));
    }

    #[rstest]
    #[case::plain("2020-06-15", 2020, 6, 15)]
    #[case::leap_day("2020-02-29", 2020, 2, 29)]
    #[case::padded(" 2019-01-02 ", 2019, 1, 2)]
    fn test_parse_date_accepts(
        #[case] input: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date = parse_date("e", input).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[rstest]
    #[case::bad_month("2020-13-01")]
    #[case::non_leap_day("2019-02-29")]
    #[case::wrong_order("15-06-2020")]
    #[case::words("June 15, 2020")]
    #[case::empty("")]
    fn test_parse_date_rejects(#[case] input: &str) {
        let error = parse_date("whitlock-jordan", input).unwrap_err();
        assert!(matches!(error, ReportError::InvalidDate { .. }));
    }

    #[test]
    fn test_import_folds_into_cache() {
        let mut cache = SupporterCache::new();

        import(&mut cache, &row("whitlock-jordan", "2020-01-15", "$10.00", "Supporter:Annual"))
            .unwrap();
        import(&mut cache, &row("whitlock-jordan", "2020-06-15", "$2.50", "Conference"))
            .unwrap();

        let record = cache.get("whitlock-jordan").unwrap();
        assert_eq!(record.payment_count, 2);
        assert_eq!(record.payment_total, Decimal::from_str("12.50").unwrap());
        assert_eq!(
            record.last_payment.as_ref().unwrap().date,
            NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_import_creates_bare_record_for_unknown_entity() {
        let mut cache = SupporterCache::new();

        import(&mut cache, &row("never-contacted", "2020-01-15", "$5.00", "Conference"))
            .unwrap();

        let record = cache.get("never-contacted").unwrap();
        assert_eq!(record.display_name, None);
        assert_eq!(record.payment_count, 1);
    }

    #[test]
    fn test_import_surfaces_parse_errors() {
        let mut cache = SupporterCache::new();

        let error = import(&mut cache, &row("e", "not-a-date", "$5.00", "P")).unwrap_err();
        assert!(matches!(error, ReportError::InvalidDate { .. }));
    }
}
