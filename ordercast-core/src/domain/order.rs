//! OrderRecord — one parsed row of the source order CSV.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single sales order line, immutable once read.
///
/// `quantity` is non-negative by construction (unsigned); the loader rejects
/// rows whose quantity column does not parse as an unsigned integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDateTime,
    pub order_number: u32,
    pub quantity: u32,
    pub unit_price: f64,
    pub product_line: String,
    pub product_code: String,
    pub status: String,
}

impl OrderRecord {
    /// Calendar date of the order (time-of-day discarded for aggregation).
    pub fn date(&self) -> NaiveDate {
        self.order_date.date()
    }
}
