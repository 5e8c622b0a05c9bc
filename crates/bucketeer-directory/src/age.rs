//! Age from a birth date

use chrono::{Datelike, NaiveDate};

/// Parse a birth date
///
/// Accepts the API's unpadded `YYYY-M-D` form, zero-padded ISO dates, and
/// ISO timestamps (the time part is ignored).
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().split(['T', ' ']).next()?;

    let mut parts = date.split('-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whole years between `birth` and `today`
///
/// A birthday not yet reached this year counts one year less.
pub fn years_between(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// Age shown for a user, or `None` if it is not plausible
///
/// Only ages from 1 to 99 are reported.
pub fn age_on(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let birth = parse_birth_date(birth_date)?;
    let years = years_between(birth, today);
    (1..=99).contains(&years).then_some(years as u32)
}
