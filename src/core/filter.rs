//! Filter engine module
//!
//! This module turns user-supplied `key=value` criteria into predicates and
//! evaluates their conjunction against supporter records.
//!
//! The filter engine is responsible for:
//! - Parsing and validating criteria before any aggregation work happens
//! - Resolving key aliases (`state` and `province` both mean `region`)
//! - Expanding values through the geographic reference tables, so
//!   `state=KY` also matches records that spell out `Kentucky`
//! - Lazily yielding the passing subset in cache iteration order
//!
//! Criteria for the same key overwrite each other (last-specified wins);
//! criteria for different keys compose with AND. One built-in predicate is
//! always active: a record must have a non-empty entity key.

use crate::reference::{countries, normalize, regions};
use crate::types::{ReportError, SupporterRecord};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Canonical criterion kinds, after alias resolution
///
/// This is the closed set of user-settable predicates. Dispatch is by this
/// tag; there is no dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    /// `region`, `state`, or `province`
    Region,
    /// `country`
    Country,
    /// `since`
    Since,
}

/// One compiled predicate with its match data
#[derive(Debug, Clone)]
enum Predicate {
    /// Record's region must be one of the accepted values
    Region { accepted: HashSet<String> },
    /// Record's country code or country name must be accepted
    Country {
        codes: HashSet<String>,
        names: HashSet<String>,
    },
    /// Record's last payment must be on or after the bound
    Since { bound: NaiveDate },
}

impl Predicate {
    fn matches(&self, record: &SupporterRecord) -> bool {
        match self {
            Predicate::Region { accepted } => record
                .region
                .as_deref()
                .is_some_and(|region| accepted.contains(&normalize(region))),
            Predicate::Country { codes, names } => {
                let code_hit = record
                    .country_code
                    .as_deref()
                    .is_some_and(|code| codes.contains(&normalize(code)));
                let name_hit = record
                    .country_name
                    .as_deref()
                    .is_some_and(|name| names.contains(&normalize(name)));
                code_hit || name_hit
            }
            Predicate::Since { bound } => record
                .last_payment
                .as_ref()
                .is_some_and(|snapshot| snapshot.date >= *bound),
        }
    }
}

/// Compiled set of filter predicates
///
/// Built once from the raw criteria strings, then evaluated against each
/// record. An empty set passes every record that has an entity key.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    /// Active predicate per criterion kind
    predicates: HashMap<CriterionKind, Predicate>,
}

impl FilterSet {
    /// Parse raw `key=value` criteria into a filter set
    ///
    /// All criteria are validated up front: a malformed or unrecognized
    /// criterion fails here, before any input feed is read.
    ///
    /// # Arguments
    ///
    /// * `criteria` - The raw criterion strings, in command-line order
    ///
    /// # Returns
    ///
    /// * `Ok(FilterSet)` - The compiled predicates
    /// * `Err(ReportError)` - Naming the offending criterion and reason
    ///
    /// # Errors
    ///
    /// Returns an error if a criterion lacks `=`, has an empty key or
    /// value, names an unrecognized key, sets the built-in `entity` key,
    /// or carries an unparseable `since` date.
    pub fn parse(criteria: &[String]) -> Result<Self, ReportError> {
        let mut predicates = HashMap::new();

        for criterion in criteria {
            let (raw_key, raw_value) = criterion
                .split_once('=')
                .ok_or_else(|| ReportError::invalid_criterion(criterion, "expected KEY=VALUE"))?;
            if raw_key.trim().is_empty() {
                return Err(ReportError::invalid_criterion(criterion, "empty key"));
            }
            if raw_value.trim().is_empty() {
                return Err(ReportError::invalid_criterion(criterion, "empty value"));
            }

            let (kind, predicate) = match normalize(raw_key).as_str() {
                "region" | "state" | "province" => (CriterionKind::Region, build_region(raw_value)),
                "country" => (CriterionKind::Country, build_country(raw_value)),
                "since" => (CriterionKind::Since, build_since(criterion, raw_value)?),
                "entity" => {
                    return Err(ReportError::invalid_criterion(
                        criterion,
                        "key 'entity' is built-in and always active",
                    ));
                }
                _ => return Err(ReportError::unknown_criterion(raw_key.trim(), criterion)),
            };
            // Last-specified criterion wins for its kind.
            predicates.insert(kind, predicate);
        }

        Ok(FilterSet { predicates })
    }

    /// Evaluate the conjunction of all predicates against one record
    ///
    /// The built-in entity predicate runs first: records without an entity
    /// key never pass, even under an empty filter set.
    pub fn matches(&self, record: &SupporterRecord) -> bool {
        if record.entity.is_empty() {
            return false;
        }
        self.predicates
            .values()
            .all(|predicate| predicate.matches(record))
    }

    /// Lazily yield the passing subset of an iterator of records
    ///
    /// Records are yielded in their input order; filtering never re-sorts.
    pub fn apply<'a>(
        &'a self,
        records: impl IntoIterator<Item = &'a SupporterRecord> + 'a,
    ) -> impl Iterator<Item = &'a SupporterRecord> + 'a {
        records.into_iter().filter(move |record| self.matches(record))
    }
}

/// Build the region predicate for a raw criterion value
///
/// The needle is matched against the region table; table hits register the
/// union of their codes and names, so a code needle also accepts the
/// spelled-out name and vice versa. A miss registers the needle itself,
/// which keeps free-text regions filterable.
fn build_region(raw_value: &str) -> Predicate {
    let needle = normalize(raw_value);
    let rows = regions::lookup(&needle);

    let mut accepted = HashSet::new();
    if rows.is_empty() {
        accepted.insert(needle);
    } else {
        for row in rows {
            accepted.insert(normalize(&row.code));
            accepted.insert(normalize(&row.name));
        }
    }
    Predicate::Region { accepted }
}

/// Build the country predicate for a raw criterion value
///
/// Table hits register codes and names as two independent sets; a record
/// passes on either its code or its name. A miss registers the needle in
/// both sets (literal fallback).
fn build_country(raw_value: &str) -> Predicate {
    let needle = normalize(raw_value);
    let rows = countries::lookup(&needle);

    let mut codes = HashSet::new();
    let mut names = HashSet::new();
    if rows.is_empty() {
        codes.insert(needle.clone());
        names.insert(needle);
    } else {
        for row in rows {
            if !row.alpha2.is_empty() {
                codes.insert(normalize(&row.alpha2));
            }
            if !row.alpha3.is_empty() {
                codes.insert(normalize(&row.alpha3));
            }
            names.insert(normalize(&row.name));
        }
    }
    Predicate::Country { codes, names }
}

fn build_since(criterion: &str, raw_value: &str) -> Result<Predicate, ReportError> {
    let bound = NaiveDate::parse_from_str(raw_value.trim(), "%Y-%m-%d").map_err(|_| {
        ReportError::invalid_criterion(criterion, "expected an ISO date (YYYY-MM-DD)")
    })?;
    Ok(Predicate::Since { bound })
}
