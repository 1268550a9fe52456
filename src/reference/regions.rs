//! North American region reference table
//!
//! Postal subdivisions of the United States and Canada: states, the federal
//! district, territories, provinces, and the military postal regions. The
//! military code `AE` intentionally maps to several names, so lookups
//! return every matching row rather than a single one.

use crate::reference::normalize;
use serde::Deserialize;
use std::sync::LazyLock;

/// One row of the region table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Region {
    /// Two-letter postal code
    pub code: String,
    /// Full region name
    pub name: String,
}

static REGIONS_TSV: &str = include_str!("data/regions.tsv");

/// All rows of the region table
///
/// Loaded from the embedded tab-separated data on first access. The table
/// is read-only for the life of the process.
pub static REGIONS: LazyLock<Vec<Region>> = LazyLock::new(|| {
    load(REGIONS_TSV).expect("embedded region table is well-formed")
});

fn load(tsv: &str) -> Result<Vec<Region>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(tsv.as_bytes());
    reader.deserialize().collect()
}

/// Look up regions by postal code or name
///
/// Matches the needle against the 2-letter code and the full name, both
/// case-insensitively. A code shared across regions returns one row per
/// region.
///
/// # Arguments
///
/// * `needle` - The normalized text to look up
///
/// # Returns
///
/// All matching rows, empty if the needle matches nothing.
pub fn lookup(needle: &str) -> Vec<&'static Region> {
    REGIONS
        .iter()
        .filter(|region| normalize(&region.code) == needle || normalize(&region.name) == needle)
        .collect()
}
