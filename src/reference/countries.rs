//! Country reference table
//!
//! A static table of countries and territories, embedded at compile time
//! and parsed once on first use. Rows carry the ISO-style numeric, 2-letter
//! and 3-letter codes alongside the official name; a handful of disputed
//! territories have no assigned codes and participate in name lookups only.

use crate::reference::normalize;
use serde::Deserialize;
use std::sync::LazyLock;

/// One row of the country table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Country {
    /// Three-digit numeric code, empty for territories without one
    pub numeric: String,
    /// Two-letter code, empty for territories without one
    pub alpha2: String,
    /// Three-letter code, empty for territories without one
    pub alpha3: String,
    /// Official name
    pub name: String,
    /// Capital city, empty where none exists
    #[serde(default)]
    pub capital: String,
}

static COUNTRIES_TSV: &str = include_str!("data/countries.tsv");

/// All rows of the country table
///
/// Loaded from the embedded tab-separated data on first access. The table
/// is read-only for the life of the process.
pub static COUNTRIES: LazyLock<Vec<Country>> = LazyLock::new(|| {
    load(COUNTRIES_TSV).expect("embedded country table is well-formed")
});

fn load(tsv: &str) -> Result<Vec<Country>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(tsv.as_bytes());
    reader.deserialize().collect()
}

/// Look up countries by code or name
///
/// Matches the needle against the 2-letter code, the 3-letter code, and the
/// official name, all case-insensitively. Rows with empty codes (disputed
/// territories) never match a code-based lookup.
///
/// # Arguments
///
/// * `needle` - The normalized text to look up
///
/// # Returns
///
/// All matching rows, empty if the needle matches nothing.
pub fn lookup(needle: &str) -> Vec<&'static Country> {
    COUNTRIES
        .iter()
        .filter(|country| {
            (!country.alpha2.is_empty() && normalize(&country.alpha2) == needle)
                || (!country.alpha3.is_empty() && normalize(&country.alpha3) == needle)
                || normalize(&country.name) == needle
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads_and_is_populated() {
        assert!(COUNTRIES.len() >= 250);
        assert!(COUNTRIES.iter().all(|c| !c.name.is_empty()));
    }

    #[test]
    fn test_lookup_by_alpha2_code() {
        let matches = lookup("us");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "United States of America");
        assert_eq!(matches[0].alpha3, "USA");
    }

    #[test]
    fn test_lookup_by_alpha3_code() {
        let matches = lookup("nzl");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].alpha2, "NZ");
        assert_eq!(matches[0].name, "New Zealand");
    }

    #[test]
    fn test_lookup_by_full_name() {
        let matches = lookup("united states of america");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].alpha2, "US");
    }

    #[test]
    fn test_disputed_territory_matches_by_name_only() {
        let matches = lookup("kosovo");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].alpha2, "");
        assert_eq!(matches[0].alpha3, "");
    }

    #[test]
    fn test_empty_codes_never_match_code_lookups() {
        // An empty needle must not sweep in the code-less rows.
        assert!(lookup("").is_empty());
    }

    #[test]
    fn test_unknown_needle_matches_nothing() {
        assert!(lookup("wakanda").is_empty());
    }
}
