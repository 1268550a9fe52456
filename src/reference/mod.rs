//! Reference module
//!
//! Static geographic lookup data used by the filter layer:
//! - `countries`: Country codes, names, and capitals
//! - `regions`: North American postal subdivisions
//!
//! Both tables are embedded at compile time and loaded once at first use.
//! Lookups operate on normalized text, so callers should pass needles
//! through [`normalize`] first.

pub mod countries;
pub mod regions;

pub use countries::{Country, COUNTRIES};
pub use regions::{Region, REGIONS};

/// Normalize text for comparisons against the reference tables
///
/// Trims the text, collapses internal whitespace runs to a single space,
/// and lowercases the result. Record fields and filter values both pass
/// through this before any comparison so that `" New   Zealand "` and
/// `"new zealand"` compare equal.
///
/// # Arguments
///
/// * `text` - The raw text to normalize
///
/// # Returns
///
/// The normalized form, empty if the input held only whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lowercases("Kentucky", "kentucky")]
    #[case::trims("  KY  ", "ky")]
    #[case::collapses_runs("New \t Zealand", "new zealand")]
    #[case::whitespace_only("   ", "")]
    #[case::already_normal("armed forces europe", "armed forces europe")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }
}
