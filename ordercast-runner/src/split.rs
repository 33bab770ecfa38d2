//! Train/test splitting at a cutoff date.
//!
//! The cutoff is an inclusive lower bound for the test range: train holds
//! dates strictly before the cutoff, test holds dates on or after it. The
//! partition is total and non-overlapping, preserving series order.

use chrono::NaiveDate;

use ordercast_core::domain::AugmentedSeries;

/// Partition a series at the cutoff date into (train, test).
pub fn split_at(series: &AugmentedSeries, cutoff: NaiveDate) -> (AugmentedSeries, AugmentedSeries) {
    let (train, test) = series
        .points
        .iter()
        .cloned()
        .partition(|p| p.date < cutoff);
    (
        AugmentedSeries { points: train },
        AugmentedSeries { points: test },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordercast_core::calendar::{derive_calendar_fields, HolidaySet};
    use ordercast_core::domain::{DailyPoint, DailySeries};

    fn series_of(days: &[u32]) -> AugmentedSeries {
        let daily = DailySeries {
            points: days
                .iter()
                .map(|&d| DailyPoint {
                    date: NaiveDate::from_ymd_opt(2004, 11, d).unwrap(),
                    total_quantity: u64::from(d),
                })
                .collect(),
        };
        derive_calendar_fields(&daily, &HolidaySet::default())
    }

    #[test]
    fn cutoff_date_belongs_to_test() {
        let series = series_of(&[1, 2, 3, 4]);
        let cutoff = NaiveDate::from_ymd_opt(2004, 11, 3).unwrap();
        let (train, test) = split_at(&series, cutoff);

        assert_eq!(train.len(), 2);
        assert_eq!(test.len(), 2);
        assert!(train.points.iter().all(|p| p.date < cutoff));
        assert!(test.points.iter().all(|p| p.date >= cutoff));
        assert_eq!(test.points[0].date, cutoff);
    }

    #[test]
    fn partition_is_total() {
        let series = series_of(&[1, 2, 3, 4, 5]);
        let cutoff = NaiveDate::from_ymd_opt(2004, 11, 4).unwrap();
        let (train, test) = split_at(&series, cutoff);
        assert_eq!(train.len() + test.len(), series.len());
    }

    #[test]
    fn cutoff_before_series_puts_everything_in_test() {
        let series = series_of(&[10, 11]);
        let (train, test) = split_at(&series, NaiveDate::from_ymd_opt(2004, 1, 1).unwrap());
        assert!(train.is_empty());
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn cutoff_after_series_puts_everything_in_train() {
        let series = series_of(&[10, 11]);
        let (train, test) = split_at(&series, NaiveDate::from_ymd_opt(2005, 1, 1).unwrap());
        assert_eq!(train.len(), 2);
        assert!(test.is_empty());
    }
}
