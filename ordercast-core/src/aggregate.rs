//! Daily aggregation of order records.
//!
//! Groups orders by calendar date and sums ordered quantity. Duplicates at
//! the same date are summed, never averaged. Output is ascending by date
//! with one row per date, regardless of input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DailyPoint, DailySeries, OrderRecord};

/// Aggregate order records into a daily demand series.
///
/// Sum of `total_quantity` over the output equals the sum of `quantity`
/// over the input (conservation, property-tested).
pub fn aggregate_daily(records: &[OrderRecord]) -> DailySeries {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date()).or_insert(0) += u64::from(record.quantity);
    }

    DailySeries {
        points: totals
            .into_iter()
            .map(|(date, total_quantity)| DailyPoint {
                date,
                total_quantity,
            })
            .collect(),
    }
}
