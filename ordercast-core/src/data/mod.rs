//! Data layer: CSV order loading.

pub mod loader;

pub use loader::{load_orders, parse_order_date, LoadError, ORDER_DATE_FORMAT};
