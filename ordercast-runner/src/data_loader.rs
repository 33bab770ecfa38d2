//! Order resolution for the runner.
//!
//! Resolves the configured CSV into order records. Fallback policy:
//! 1. If the file loads → use it
//! 2. If the file is missing and `synthetic` is allowed → generate
//!    deterministic synthetic orders (tagged)
//! 3. Otherwise → fail with the loader error
//!
//! Synthetic data is a developer-only demo mode. Results produced on
//! synthetic data are tagged in every artifact.

use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use ordercast_core::data::{load_orders, LoadError};
use ordercast_core::domain::OrderRecord;

/// Where resolved orders came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Csv,
    Synthetic,
}

/// Result of order resolution, including provenance.
#[derive(Debug, Clone)]
pub struct LoadedOrders {
    pub records: Vec<OrderRecord>,
    pub source: DataSource,
    /// Deterministic BLAKE3 hash over the records, for artifact naming and
    /// reproducibility checks.
    pub dataset_hash: String,
}

impl LoadedOrders {
    pub fn has_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Resolve order records from a CSV path, with optional synthetic fallback.
pub fn resolve_orders(path: &Path, synthetic: bool) -> Result<LoadedOrders, LoadError> {
    match load_orders(path) {
        Ok(records) => {
            let dataset_hash = compute_dataset_hash(&records);
            Ok(LoadedOrders {
                records,
                source: DataSource::Csv,
                dataset_hash,
            })
        }
        Err(err @ LoadError::Io { .. }) if synthetic => {
            eprintln!(
                "WARNING: {err}; generating synthetic orders — results will be tagged as synthetic"
            );
            let records = generate_synthetic_orders(
                "ordercast",
                NaiveDate::from_ymd_opt(2003, 1, 2).expect("valid calendar date"),
                NaiveDate::from_ymd_opt(2005, 5, 31).expect("valid calendar date"),
            );
            let dataset_hash = compute_dataset_hash(&records);
            Ok(LoadedOrders {
                records,
                source: DataSource::Synthetic,
                dataset_hash,
            })
        }
        Err(err) => Err(err),
    }
}

/// Compute a deterministic BLAKE3 hash over all order records.
///
/// Covers the order date, number, quantity, unit price, and product code in
/// input order, so identical files hash identically.
pub fn compute_dataset_hash(records: &[OrderRecord]) -> String {
    let mut hasher = blake3::Hasher::new();
    for record in records {
        hasher.update(record.order_date.to_string().as_bytes());
        hasher.update(&record.order_number.to_le_bytes());
        hasher.update(&record.quantity.to_le_bytes());
        hasher.update(&record.unit_price.to_le_bytes());
        hasher.update(record.product_code.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

const SYNTHETIC_PRODUCT_LINES: [&str; 7] = [
    "Classic Cars",
    "Motorcycles",
    "Planes",
    "Ships",
    "Trains",
    "Trucks and Buses",
    "Vintage Cars",
];

/// Generate synthetic order records for testing/demo use.
///
/// Orders land on weekdays only, one to four per day, with quantities and
/// prices in the ranges typical of the real sample data. The RNG is seeded
/// from a BLAKE3 hash of `seed_label`, so the same label always produces
/// the same orders.
pub fn generate_synthetic_orders(
    seed_label: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<OrderRecord> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let seed: [u8; 32] = *blake3::hash(seed_label.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut records = Vec::new();
    let mut order_number = 10_100u32;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            current += Duration::days(1);
            continue;
        }

        let orders_today = rng.gen_range(1..=4);
        for _ in 0..orders_today {
            order_number += 1;
            let quantity: u32 = rng.gen_range(10..=80);
            let unit_price = (rng.gen_range(20.0..120.0_f64) * 100.0).round() / 100.0;
            let line = SYNTHETIC_PRODUCT_LINES[rng.gen_range(0..SYNTHETIC_PRODUCT_LINES.len())];
            records.push(OrderRecord {
                order_date: current.and_hms_opt(0, 0, 0).expect("valid time of day"),
                order_number,
                quantity,
                unit_price,
                product_line: line.to_string(),
                product_code: format!("S{}_{}", rng.gen_range(10..25), rng.gen_range(1000..5000)),
                status: "Shipped".to_string(),
            });
        }

        current += Duration::days(1);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ORDERNUMBER,QUANTITYORDERED,PRICEEACH,ORDERDATE,STATUS,PRODUCTLINE,PRODUCTCODE"
        )
        .unwrap();
        writeln!(file, "10107,30,95.70,2/24/2003 0:00,Shipped,Motorcycles,S10_1678").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn resolves_csv_when_present() {
        let file = sample_csv();
        let loaded = resolve_orders(file.path(), false).unwrap();
        assert_eq!(loaded.source, DataSource::Csv);
        assert_eq!(loaded.records.len(), 1);
        assert!(!loaded.has_synthetic());
        assert!(!loaded.dataset_hash.is_empty());
    }

    #[test]
    fn missing_file_fails_without_synthetic() {
        let err = resolve_orders(Path::new("/nonexistent/orders.csv"), false).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn synthetic_fallback_produces_tagged_data() {
        let loaded = resolve_orders(Path::new("/nonexistent/orders.csv"), true).unwrap();
        assert_eq!(loaded.source, DataSource::Synthetic);
        assert!(loaded.has_synthetic());
        assert!(!loaded.records.is_empty());
    }

    #[test]
    fn synthetic_orders_are_deterministic() {
        let start = NaiveDate::from_ymd_opt(2003, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2003, 3, 31).unwrap();
        let a = generate_synthetic_orders("ordercast", start, end);
        let b = generate_synthetic_orders("ordercast", start, end);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_orders() {
        let start = NaiveDate::from_ymd_opt(2003, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2003, 3, 31).unwrap();
        let a = generate_synthetic_orders("ordercast", start, end);
        let b = generate_synthetic_orders("other", start, end);
        assert_ne!(a, b);
    }

    #[test]
    fn synthetic_orders_skip_weekends() {
        let start = NaiveDate::from_ymd_opt(2003, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2003, 1, 31).unwrap();
        let records = generate_synthetic_orders("ordercast", start, end);
        assert!(records.iter().all(|r| {
            let wd = r.date().weekday();
            wd != Weekday::Sat && wd != Weekday::Sun
        }));
    }

    #[test]
    fn dataset_hash_is_deterministic_and_content_sensitive() {
        let file = sample_csv();
        let a = resolve_orders(file.path(), false).unwrap();
        let b = resolve_orders(file.path(), false).unwrap();
        assert_eq!(a.dataset_hash, b.dataset_hash);

        let mut changed = a.records.clone();
        changed[0].quantity += 1;
        assert_ne!(compute_dataset_hash(&changed), a.dataset_hash);
    }
}
