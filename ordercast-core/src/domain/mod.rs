//! Domain types for Ordercast

pub mod order;
pub mod series;

pub use order::OrderRecord;
pub use series::{AugmentedPoint, AugmentedSeries, DailyPoint, DailySeries};
