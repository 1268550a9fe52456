//! Report formatter and writer
//!
//! Projects supporter records onto the fixed report column set and writes
//! header plus data rows as CSV to a caller-supplied sink. The writer
//! never opens or closes the sink; scoped acquisition stays with the
//! caller, so the same code serves files, pipes, and test buffers.
//!
//! # Cell formatting
//!
//! - Dates render as `YYYY-MM-DD`
//! - Currency renders as a dollar amount with thousands separators; the
//!   sign is not rendered, amounts always show as positive magnitudes
//! - The program set renders as a newline-joined sorted list inside one
//!   cell (the CSV layer quotes embedded newlines)
//! - Unset attributes render as empty cells

use crate::types::{PaymentSnapshot, ReportError, SupporterRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// One column of the supporter report
///
/// The report projects every record onto this closed, ordered set of
/// attributes; `REPORT_COLUMNS` fixes the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    Entity,
    DisplayName,
    AddressName,
    FirstName,
    LastName,
    Email,
    PostalAddress,
    City,
    Region,
    PostalCode,
    CountryCode,
    CountryName,
    PayerCountry,
    PaymentCount,
    PaymentTotal,
    PaymentPrograms,
    FirstPaymentDate,
    FirstPaymentAmount,
    FirstPaymentProgram,
    LastPaymentDate,
    LastPaymentAmount,
    LastPaymentProgram,
}

/// Report columns in output order
pub const REPORT_COLUMNS: &[ReportColumn] = &[
    ReportColumn::Entity,
    ReportColumn::DisplayName,
    ReportColumn::AddressName,
    ReportColumn::FirstName,
    ReportColumn::LastName,
    ReportColumn::Email,
    ReportColumn::PostalAddress,
    ReportColumn::City,
    ReportColumn::Region,
    ReportColumn::PostalCode,
    ReportColumn::CountryCode,
    ReportColumn::CountryName,
    ReportColumn::PayerCountry,
    ReportColumn::PaymentCount,
    ReportColumn::PaymentTotal,
    ReportColumn::PaymentPrograms,
    ReportColumn::FirstPaymentDate,
    ReportColumn::FirstPaymentAmount,
    ReportColumn::FirstPaymentProgram,
    ReportColumn::LastPaymentDate,
    ReportColumn::LastPaymentAmount,
    ReportColumn::LastPaymentProgram,
];

impl ReportColumn {
    /// The column's attribute name
    pub fn attribute_name(&self) -> &'static str {
        match self {
            ReportColumn::Entity => "entity",
            ReportColumn::DisplayName => "display_name",
            ReportColumn::AddressName => "address_name",
            ReportColumn::FirstName => "first_name",
            ReportColumn::LastName => "last_name",
            ReportColumn::Email => "email",
            ReportColumn::PostalAddress => "postal_address",
            ReportColumn::City => "city",
            ReportColumn::Region => "region",
            ReportColumn::PostalCode => "postal_code",
            ReportColumn::CountryCode => "country_code",
            ReportColumn::CountryName => "country_name",
            ReportColumn::PayerCountry => "payer_country",
            ReportColumn::PaymentCount => "payment_count",
            ReportColumn::PaymentTotal => "payment_total",
            ReportColumn::PaymentPrograms => "payment_programs",
            ReportColumn::FirstPaymentDate => "first_payment_date",
            ReportColumn::FirstPaymentAmount => "first_payment_amount",
            ReportColumn::FirstPaymentProgram => "first_payment_program",
            ReportColumn::LastPaymentDate => "last_payment_date",
            ReportColumn::LastPaymentAmount => "last_payment_amount",
            ReportColumn::LastPaymentProgram => "last_payment_program",
        }
    }

    /// The human-readable column title
    ///
    /// Derived from the attribute name by replacing underscores with
    /// spaces and title-casing each word.
    pub fn title(&self) -> String {
        self.attribute_name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format one record's cell for this column
    pub fn cell(&self, record: &SupporterRecord) -> String {
        match self {
            ReportColumn::Entity => record.entity.clone(),
            ReportColumn::DisplayName => optional(&record.display_name),
            ReportColumn::AddressName => optional(&record.address_name),
            ReportColumn::FirstName => optional(&record.first_name),
            ReportColumn::LastName => optional(&record.last_name),
            ReportColumn::Email => optional(&record.email),
            ReportColumn::PostalAddress => optional(&record.postal_address),
            ReportColumn::City => optional(&record.city),
            ReportColumn::Region => optional(&record.region),
            ReportColumn::PostalCode => optional(&record.postal_code),
            ReportColumn::CountryCode => optional(&record.country_code),
            ReportColumn::CountryName => optional(&record.country_name),
            ReportColumn::PayerCountry => optional(&record.payer_country),
            ReportColumn::PaymentCount => record.payment_count.to_string(),
            ReportColumn::PaymentTotal => format_currency(&record.payment_total),
            ReportColumn::PaymentPrograms => {
                // BTreeSet iterates sorted, which is the serialization order.
                record
                    .payment_programs
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            ReportColumn::FirstPaymentDate => snapshot_date(&record.first_payment),
            ReportColumn::FirstPaymentAmount => snapshot_amount(&record.first_payment),
            ReportColumn::FirstPaymentProgram => snapshot_program(&record.first_payment),
            ReportColumn::LastPaymentDate => snapshot_date(&record.last_payment),
            ReportColumn::LastPaymentAmount => snapshot_amount(&record.last_payment),
            ReportColumn::LastPaymentProgram => snapshot_program(&record.last_payment),
        }
    }
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn snapshot_date(snapshot: &Option<PaymentSnapshot>) -> String {
    snapshot
        .as_ref()
        .map(|s| s.date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn snapshot_amount(snapshot: &Option<PaymentSnapshot>) -> String {
    snapshot
        .as_ref()
        .map(|s| format_currency(&s.amount))
        .unwrap_or_default()
}

fn snapshot_program(snapshot: &Option<PaymentSnapshot>) -> String {
    snapshot.as_ref().map(|s| s.program.clone()).unwrap_or_default()
}

/// Format a decimal as dollar currency text
///
/// The absolute value is rounded to cents (midpoint away from zero) and
/// grouped with comma thousands separators. The sign is dropped: refunds
/// show the same way as payments.
pub fn format_currency(amount: &Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, format!("{:0<2}", fraction)),
        None => (text.as_str(), "00".to_string()),
    };
    format!("${}.{}", group_thousands(whole), fraction)
}

fn group_thousands(digits: &str) -> String {
    let count = digits.chars().count();
    let mut grouped = String::with_capacity(count + count / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (count - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Write the report for an iterator of records
///
/// Emits the header row followed by one row per record, in iteration
/// order, then flushes. The sink stays open; closing it is the caller's
/// job.
///
/// # Arguments
///
/// * `records` - The records to report, typically the filter's passing
///   subset
/// * `output` - The sink to write CSV to
///
/// # Errors
///
/// Returns an `IoError` if writing to or flushing the sink fails.
pub fn write_report<'a, I>(records: I, output: &mut dyn Write) -> Result<(), ReportError>
where
    I: IntoIterator<Item = &'a SupporterRecord>,
{
    let mut writer = csv::Writer::from_writer(output);

    let titles: Vec<String> = REPORT_COLUMNS.iter().map(ReportColumn::title).collect();
    writer.write_record(&titles).map_err(|e| ReportError::IoError {
        message: format!("Failed to write report header: {}", e),
    })?;

    for record in records {
        let cells: Vec<String> = REPORT_COLUMNS
            .iter()
            .map(|column| column.cell(record))
            .collect();
        writer.write_record(&cells).map_err(|e| ReportError::IoError {
            message: format!("Failed to write report row: {}", e),
        })?;
    }

    writer.flush().map_err(|e| ReportError::IoError {
        message: format!("Failed to flush report output: {}", e),
    })?;
    Ok(())
}
