//! Calendar-month arithmetic
//!
//! Date helpers for the returning-supporters report, which walks month by
//! month and compares payment dates against month boundaries. All arithmetic
//! moves by whole calendar months, clamping the day-of-month to the target
//! month's length. February is treated as 28 days in every year so that the
//! month walk lands on the same day regardless of leap years.

use chrono::{Datelike, NaiveDate};

/// Maximum day of each month, indexed by month number minus one
///
/// February is fixed at 28 days; see the module docs.
const MONTH_MAX_DAY: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Move a date by a number of calendar months
///
/// The day-of-month is `day` if given, otherwise the source day, and is
/// clamped to the target month's length. Years that would fall outside the
/// representable calendar range clamp to its bounds.
///
/// # Arguments
///
/// * `date` - The date to move
/// * `delta` - Number of months to move, negative for earlier months
/// * `day` - Day-of-month override for the result
pub fn adjust_month(date: NaiveDate, delta: i32, day: Option<u32>) -> NaiveDate {
    let day = day.unwrap_or_else(|| date.day());
    let magnitude = i64::from(delta).abs();
    let mut year_shift = magnitude / 12;
    let mut month = if delta < 0 {
        i64::from(date.month()) - magnitude % 12
    } else {
        i64::from(date.month()) + magnitude % 12
    };
    if !(1..=12).contains(&month) {
        year_shift += 1;
        month += if delta < 0 { 12 } else { -12 };
    }
    let year = if delta < 0 {
        i64::from(date.year()) - year_shift
    } else {
        i64::from(date.year()) + year_shift
    };
    let day = day.clamp(1, MONTH_MAX_DAY[month as usize - 1]);

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, day))
        .unwrap_or(if delta < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// The same day one month later, clamped to the month's length
pub fn next_month(date: NaiveDate) -> NaiveDate {
    adjust_month(date, 1, None)
}

/// The same day twelve months later, clamped to the month's length
pub fn next_year(date: NaiveDate) -> NaiveDate {
    adjust_month(date, 12, None)
}

/// The first day of the following month
pub fn round_month_up(date: NaiveDate) -> NaiveDate {
    adjust_month(date, 1, Some(1))
}

/// Parse a `YYYY-MM` month argument into the first day of that month
///
/// Used as the clap value parser for the `--start-month` and `--end-month`
/// options.
///
/// # Errors
///
/// Returns a description of the expected form if the value does not name a
/// calendar month.
pub fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a YYYY-MM month", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case::forward_within_year(date(2020, 3, 15), 2, None, date(2020, 5, 15))]
    #[case::forward_across_year(date(2020, 11, 30), 3, None, date(2021, 2, 28))]
    #[case::backward_within_year(date(2020, 8, 1), -5, None, date(2020, 3, 1))]
    #[case::backward_across_year(date(2020, 2, 10), -3, None, date(2019, 11, 10))]
    #[case::whole_years(date(2020, 6, 20), 24, None, date(2022, 6, 20))]
    #[case::zero_delta(date(2020, 7, 18), 0, None, date(2020, 7, 18))]
    #[case::day_clamped_to_short_month(date(2020, 1, 31), 3, None, date(2020, 4, 30))]
    #[case::february_capped_at_28_even_in_leap_years(date(2020, 1, 29), 1, None, date(2020, 2, 28))]
    #[case::day_override(date(2020, 7, 18), -1, Some(1), date(2020, 6, 1))]
    #[case::day_override_clamped(date(2020, 1, 15), 1, Some(31), date(2020, 2, 28))]
    fn test_adjust_month_moves_by_calendar_months(
        #[case] start: NaiveDate,
        #[case] delta: i32,
        #[case] day: Option<u32>,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(adjust_month(start, delta, day), expected);
    }

    #[rstest]
    #[case::mid_month(date(2020, 1, 15), date(2020, 2, 15))]
    #[case::forward_clamp(date(2020, 1, 30), date(2020, 2, 28))]
    #[case::december_rolls_over(date(2020, 12, 10), date(2021, 1, 10))]
    fn test_next_month_keeps_the_day(#[case] start: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(next_month(start), expected);
    }

    #[test]
    fn test_next_year_moves_twelve_months() {
        assert_eq!(next_year(date(2020, 6, 20)), date(2021, 6, 20));
        assert_eq!(next_year(date(2020, 2, 29)), date(2021, 2, 28));
    }

    #[rstest]
    #[case::mid_month(date(2020, 1, 15), date(2020, 2, 1))]
    #[case::first_of_month(date(2020, 1, 1), date(2020, 2, 1))]
    #[case::last_of_year(date(2020, 12, 31), date(2021, 1, 1))]
    fn test_round_month_up_returns_first_of_following_month(
        #[case] start: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(round_month_up(start), expected);
    }

    #[rstest]
    #[case::padded("2024-05", date(2024, 5, 1))]
    #[case::unpadded_month("2024-5", date(2024, 5, 1))]
    #[case::surrounding_whitespace(" 2024-12 ", date(2024, 12, 1))]
    fn test_parse_month_accepts_year_month(#[case] value: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_month(value), Ok(expected));
    }

    #[rstest]
    #[case::year_only("2024")]
    #[case::full_date("2024-05-01")]
    #[case::month_out_of_range("2024-13")]
    #[case::not_a_month("soon")]
    #[case::empty("")]
    fn test_parse_month_rejects_malformed_input(#[case] value: &str) {
        assert!(parse_month(value).is_err());
    }
}
