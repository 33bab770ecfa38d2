//! US exchange holiday calendar.
//!
//! Nine holidays per year with observed-date shift rules:
//! - Fixed-date holidays (New Year's Day, Independence Day, Christmas) use
//!   nearest-workday observance: Saturday shifts to the preceding Friday,
//!   Sunday to the following Monday.
//! - Floating holidays are nth/last-weekday rules (MLK Day, Presidents'
//!   Day, Memorial Day, Labor Day, Thanksgiving).
//! - Good Friday is two days before Easter Sunday, computed with the
//!   anonymous Gregorian computus.
//!
//! The observed New Year's Day of a year can land on Dec 31 of the prior
//! year; it is still part of that year's calendar. Membership is exact date
//! equality, never date-adjacent matching.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Precomputed set of observed holiday dates for a span of years.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Build the observed holiday set for the given years.
    pub fn for_years(years: &[i32]) -> Self {
        let dates = years
            .iter()
            .flat_map(|&year| holidays_for_year(year))
            .map(|(_, date)| date)
            .collect();
        Self { dates }
    }

    /// Exact membership test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All observed dates, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

/// The nine observed holidays of one year, in calendar order of their
/// nominal dates: (name, observed date).
pub fn holidays_for_year(year: i32) -> Vec<(&'static str, NaiveDate)> {
    vec![
        ("New Year's Day", nearest_workday(ymd(year, 1, 1))),
        (
            "Martin Luther King Jr. Day",
            nth_weekday_of_month(year, 1, Weekday::Mon, 3),
        ),
        (
            "Presidents' Day",
            nth_weekday_of_month(year, 2, Weekday::Mon, 3),
        ),
        ("Good Friday", good_friday(year)),
        ("Memorial Day", last_weekday_of_month(year, 5, Weekday::Mon)),
        ("Independence Day", nearest_workday(ymd(year, 7, 4))),
        ("Labor Day", nth_weekday_of_month(year, 9, Weekday::Mon, 1)),
        (
            "Thanksgiving",
            nth_weekday_of_month(year, 11, Weekday::Thu, 4),
        ),
        ("Christmas", nearest_workday(ymd(year, 12, 25))),
    ]
}

/// Nearest-workday observance: Saturday shifts back to Friday, Sunday
/// forward to Monday, weekdays stay put.
pub fn nearest_workday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// The nth (1-based) given weekday of a month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let first = ymd(year, month, 1);
    let offset = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    first + Duration::days(i64::from(offset + 7 * (n - 1)))
}

/// The last given weekday of a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let last = if month == 12 {
        ymd(year, 12, 31)
    } else {
        ymd(year, month + 1, 1) - Duration::days(1)
    };
    let back = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    last - Duration::days(i64::from(back))
}

/// Easter Sunday via the anonymous Gregorian computus.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}

/// Good Friday: two days before Easter Sunday.
pub fn good_friday(year: i32) -> NaiveDate {
    easter_sunday(year) - Duration::days(2)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
