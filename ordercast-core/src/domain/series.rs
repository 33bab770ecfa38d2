//! Daily and augmented series — the evolving tables of the pipeline.
//!
//! Every stage produces a new table; nothing is mutated in place. A
//! `DailySeries` holds one point per calendar date present in the source,
//! ascending and unique. An `AugmentedSeries` adds the derived calendar
//! fields and the holiday flag.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of aggregated demand: total ordered quantity across all orders
/// and product codes on that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total_quantity: u64,
}

/// Daily demand series, ascending by date with unique dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Sum of `total_quantity` over the whole series.
    pub fn total_quantity(&self) -> u64 {
        self.points.iter().map(|p| p.total_quantity).sum()
    }

    /// Calendar years spanned by the series, first to last inclusive.
    /// Empty for an empty series.
    pub fn years(&self) -> Vec<i32> {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => (first.year()..=last.year()).collect(),
            _ => Vec::new(),
        }
    }

    /// True when dates are strictly increasing (and therefore unique).
    pub fn is_strictly_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date < w[1].date)
    }
}

/// A `DailyPoint` plus derived calendar fields and the holiday flag.
///
/// All derived fields are pure functions of `date` (plus the holiday set);
/// `holiday` is serialized as `1`/`0` in CSV artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedPoint {
    /// Position in the series, 0-based.
    pub index: usize,
    pub date: NaiveDate,
    pub total_quantity: u64,
    pub year: i32,
    /// Half-year, 1 or 2.
    pub half: u8,
    /// Quarter, 1 through 4.
    pub quarter: u8,
    /// Abbreviated month label ("Jan" .. "Dec").
    pub month: String,
    /// Day of month.
    pub day: u32,
    /// Abbreviated weekday label ("Mon" .. "Sun").
    pub weekday: String,
    pub holiday: bool,
}

/// Daily series with calendar features, same ordering invariant as
/// `DailySeries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentedSeries {
    pub points: Vec<AugmentedPoint>,
}

impl AugmentedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total quantities as f64, in series order, for the statistics layer.
    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_quantity as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, q: u64) -> DailyPoint {
        DailyPoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_quantity: q,
        }
    }

    #[test]
    fn years_spans_first_to_last() {
        let series = DailySeries {
            points: vec![day(2003, 1, 6, 10), day(2005, 5, 31, 3)],
        };
        assert_eq!(series.years(), vec![2003, 2004, 2005]);
    }

    #[test]
    fn years_of_empty_series_is_empty() {
        assert!(DailySeries::default().years().is_empty());
    }

    #[test]
    fn total_quantity_sums_all_points() {
        let series = DailySeries {
            points: vec![day(2003, 1, 6, 15), day(2003, 1, 7, 3)],
        };
        assert_eq!(series.total_quantity(), 18);
    }

    #[test]
    fn strictly_increasing_detects_duplicates() {
        let ok = DailySeries {
            points: vec![day(2003, 1, 6, 1), day(2003, 1, 7, 1)],
        };
        assert!(ok.is_strictly_increasing());

        let dup = DailySeries {
            points: vec![day(2003, 1, 6, 1), day(2003, 1, 6, 1)],
        };
        assert!(!dup.is_strictly_increasing());
    }
}
