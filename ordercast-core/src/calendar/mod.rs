//! Calendar feature derivation and the exchange holiday calendar.

pub mod holidays;

pub use holidays::{holidays_for_year, HolidaySet};

use chrono::Datelike;

use crate::domain::{AugmentedPoint, AugmentedSeries, DailySeries};

/// Derive calendar fields and holiday flags for a daily series.
///
/// Pure function of the date column and the holiday set: index, year,
/// half-year, quarter, month label, day of month, weekday label, holiday
/// membership. Produces a new table; the input is untouched.
pub fn derive_calendar_fields(series: &DailySeries, holidays: &HolidaySet) -> AugmentedSeries {
    AugmentedSeries {
        points: series
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let date = point.date;
                AugmentedPoint {
                    index,
                    date,
                    total_quantity: point.total_quantity,
                    year: date.year(),
                    half: if date.month() <= 6 { 1 } else { 2 },
                    quarter: ((date.month() - 1) / 3 + 1) as u8,
                    month: date.format("%b").to_string(),
                    day: date.day(),
                    weekday: date.format("%a").to_string(),
                    holiday: holidays.contains(date),
                }
            })
            .collect(),
    }
}
