//! Date input and weekday resolution.
//!
//! `Schedule.DayOfWeek` stores full capitalized day names (`Friday`), so a flight
//! date entered by the user has to be resolved to the same string before it can be
//! joined against the weekly schedule.

use crate::error::InputError;
use chrono::{Datelike, NaiveDate, Weekday};

const DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Parse a date entered as `M/D/YY`, `M/D/YYYY` or `YYYY-MM-DD`.
///
/// Two-digit years fall in 2000-2068 for `00`-`68` and 1969-1999 otherwise.
///
/// # Errors
///
/// Returns [`InputError::InvalidDate`] if no format matches.
///
/// # Example
///
/// ```
/// use airline_core::schedule::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("3/10/23").unwrap(), NaiveDate::from_ymd_opt(2023, 3, 10).unwrap());
/// assert_eq!(parse_date("2023-03-10").unwrap(), NaiveDate::from_ymd_opt(2023, 3, 10).unwrap());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| InputError::InvalidDate(input.to_string()))
}

/// Render a date the way users type it (`3/10/23`).
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// Capitalized English name of a weekday, as stored in `Schedule.DayOfWeek`.
#[must_use]
pub const fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday name of a calendar date.
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    day_name(date.weekday())
}

/// Resolve a user-entered date straight to its schedule weekday.
///
/// # Errors
///
/// Returns [`InputError::InvalidDate`] if the input is not a date.
pub fn weekday_of(input: &str) -> Result<&'static str, InputError> {
    parse_date(input).map(weekday_name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn resolves_known_dates() {
        assert_eq!(weekday_of("3/10/23").unwrap(), "Friday");
        assert_eq!(weekday_of("03/13/2023").unwrap(), "Monday");
        assert_eq!(weekday_of("2024-02-29").unwrap(), "Thursday");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_date("13/40/23"),
            Err(InputError::InvalidDate("13/40/23".to_string()))
        );
        assert!(parse_date("").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    proptest! {
        #[test]
        fn short_form_matches_calendar(days in 0i64..24_800) {
            let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(days);
            let short = format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100);

            let name = weekday_of(&short).unwrap();
            prop_assert_eq!(name, day_name(date.weekday()));

            let mut chars = name.chars();
            let first = chars.next().unwrap();
            prop_assert!(first.is_ascii_uppercase());
            prop_assert!(chars.all(|c| c.is_ascii_lowercase()));
        }
    }
}
