//! Supporter record types for the supporter report
//!
//! This module defines the per-entity aggregate record that both importers
//! write into: descriptive contact fields merged from the contact feed, and
//! payment aggregates folded from the ledger.

use crate::types::payment::{LedgerEntry, PaymentSnapshot};
use crate::types::ReportError;
use std::collections::BTreeSet;

use rust_decimal::Decimal;

/// Descriptive fields a contact block can merge into a record
///
/// This is the closed set of record attributes the contact importer's
/// field-mapping table may target. The postal address is not listed here
/// because it is assembled from the numbered street-line fields rather than
/// merged from a single source field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    /// Preferred display name
    DisplayName,
    /// Name to use on postal mail
    AddressName,
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Email address
    Email,
    /// City of the postal address
    City,
    /// State/province/region of the postal address
    Region,
    /// Postal code
    PostalCode,
    /// Two-letter country code
    CountryCode,
    /// Full country name
    CountryName,
    /// Country the payment processor reported for the payer
    PayerCountry,
}

/// Aggregate record for one real-world supporter
///
/// Exactly one record exists per distinct entity key within a run (enforced
/// by the cache). Descriptive fields are optional and last-write-wins when
/// merged repeatedly; payment aggregates are only ever mutated by
/// [`SupporterRecord::fold_payment`] and never reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupporterRecord {
    /// Opaque entity key assigned by the entity-resolution service
    pub entity: String,

    /// Preferred display name
    pub display_name: Option<String>,

    /// Name to use on postal mail
    pub address_name: Option<String>,

    /// Given name
    pub first_name: Option<String>,

    /// Family name
    pub last_name: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Newline-joined street lines of the postal address
    pub postal_address: Option<String>,

    /// City of the postal address
    pub city: Option<String>,

    /// State/province/region of the postal address
    pub region: Option<String>,

    /// Postal code
    pub postal_code: Option<String>,

    /// Two-letter country code
    pub country_code: Option<String>,

    /// Full country name
    pub country_name: Option<String>,

    /// Country the payment processor reported for the payer
    pub payer_country: Option<String>,

    /// Number of payments folded into this record
    pub payment_count: u64,

    /// Exact signed sum of all folded payment amounts
    pub payment_total: Decimal,

    /// Distinct program identifiers across all folded payments
    ///
    /// A semantic set: duplicates collapse and iteration order is sorted,
    /// which is also the serialization order in report cells.
    pub payment_programs: BTreeSet<String>,

    /// Earliest payment seen so far
    ///
    /// Replaced only by a strictly earlier date; a payment on the same date
    /// as the current snapshot leaves it unchanged.
    pub first_payment: Option<PaymentSnapshot>,

    /// Most recent payment seen so far
    ///
    /// Replaced only by a strictly later date.
    pub last_payment: Option<PaymentSnapshot>,
}

impl SupporterRecord {
    /// Create a new record with all descriptive and aggregate fields at
    /// their zero/empty defaults
    ///
    /// # Arguments
    ///
    /// * `entity` - The opaque entity key identifying this record
    pub fn new(entity: &str) -> Self {
        SupporterRecord {
            entity: entity.to_string(),
            display_name: None,
            address_name: None,
            first_name: None,
            last_name: None,
            email: None,
            postal_address: None,
            city: None,
            region: None,
            postal_code: None,
            country_code: None,
            country_name: None,
            payer_country: None,
            payment_count: 0,
            payment_total: Decimal::ZERO,
            payment_programs: BTreeSet::new(),
            first_payment: None,
            last_payment: None,
        }
    }

    /// Merge one descriptive field into the record (last-write-wins)
    ///
    /// # Arguments
    ///
    /// * `field` - Which record attribute to set
    /// * `value` - The new value for that attribute
    pub fn set_field(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::DisplayName => &mut self.display_name,
            ContactField::AddressName => &mut self.address_name,
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::City => &mut self.city,
            ContactField::Region => &mut self.region,
            ContactField::PostalCode => &mut self.postal_code,
            ContactField::CountryCode => &mut self.country_code,
            ContactField::CountryName => &mut self.country_name,
            ContactField::PayerCountry => &mut self.payer_country,
        };
        *slot = Some(value);
    }

    /// Fold one payment observation into the running aggregates
    ///
    /// Increments the payment count, adds the amount to the exact decimal
    /// total, records the program, and updates the first/last snapshots.
    /// Only a strictly earlier date replaces the first snapshot and only a
    /// strictly later date replaces the last snapshot, so a payment on an
    /// already-recorded date changes count/total/programs but neither
    /// snapshot.
    ///
    /// # Arguments
    ///
    /// * `entry` - The parsed ledger entry to fold
    ///
    /// # Errors
    ///
    /// Returns an error if adding the amount to the running total would
    /// overflow the decimal range.
    pub fn fold_payment(&mut self, entry: &LedgerEntry) -> Result<(), ReportError> {
        let new_total = self
            .payment_total
            .checked_add(entry.amount)
            .ok_or_else(|| ReportError::total_overflow(&self.entity))?;

        self.payment_total = new_total;
        self.payment_count += 1;
        self.payment_programs.insert(entry.program.clone());

        match &self.first_payment {
            Some(first) if entry.date >= first.date => {}
            _ => self.first_payment = Some(PaymentSnapshot::from_entry(entry)),
        }
        match &self.last_payment {
            Some(last) if entry.date <= last.date => {}
            _ => self.last_payment = Some(PaymentSnapshot::from_entry(entry)),
        }

        Ok(())
    }
}
