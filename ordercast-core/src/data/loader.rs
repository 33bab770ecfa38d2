//! CSV order loading.
//!
//! Reads the source order file into `OrderRecord`s. Failure policy: no
//! retries and no fallback formats. A missing file, a malformed row, or an
//! order date that does not match the single expected format is fatal and
//! propagates immediately to the caller with row context.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::OrderRecord;

/// The one accepted order-date format: `M/D/YYYY H:MM`.
/// Chrono accepts non-padded month/day/hour digits when parsing.
pub const ORDER_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Errors from the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read order file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed order file: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: order date '{value}' does not match M/D/YYYY H:MM")]
    Date {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Raw CSV row, mapped by header name. Columns beyond these are ignored.
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    #[serde(rename = "ORDERDATE")]
    order_date: String,
    #[serde(rename = "ORDERNUMBER")]
    order_number: u32,
    #[serde(rename = "QUANTITYORDERED")]
    quantity: u32,
    #[serde(rename = "PRICEEACH")]
    unit_price: f64,
    #[serde(rename = "PRODUCTLINE")]
    product_line: String,
    #[serde(rename = "PRODUCTCODE")]
    product_code: String,
    #[serde(rename = "STATUS")]
    status: String,
}

/// Parse an order date in the fixed source format.
pub fn parse_order_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), ORDER_DATE_FORMAT)
}

/// Load all order records from a CSV file with a header row.
pub fn load_orders(path: &Path) -> Result<Vec<OrderRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawOrderRow>().enumerate() {
        let row = row?;
        // Rows are 1-based in error messages, and the header is row 1.
        let order_date = parse_order_date(&row.order_date).map_err(|source| LoadError::Date {
            row: i + 2,
            value: row.order_date.clone(),
            source,
        })?;
        records.push(OrderRecord {
            order_date,
            order_number: row.order_number,
            quantity: row.quantity,
            unit_price: row.unit_price,
            product_line: row.product_line,
            product_code: row.product_code,
            status: row.status,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Write;

    const HEADER: &str =
        "ORDERNUMBER,QUANTITYORDERED,PRICEEACH,ORDERDATE,STATUS,PRODUCTLINE,PRODUCTCODE";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_unpadded_date_format() {
        let dt = parse_order_date("2/24/2003 0:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2003, 2, 24));
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn rejects_iso_date_format() {
        assert!(parse_order_date("2003-02-24 00:00").is_err());
    }

    #[test]
    fn loads_records_ignoring_extra_columns() {
        let file = write_csv(&[
            "10107,30,95.70,2/24/2003 0:00,Shipped,Motorcycles,S10_1678",
            "10121,34,81.35,5/7/2003 0:00,Shipped,Motorcycles,S10_1678",
        ]);

        let records = load_orders(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_number, 10107);
        assert_eq!(records[0].quantity, 30);
        assert_eq!(records[0].product_code, "S10_1678");
        assert_eq!(records[1].date().month(), 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_orders(Path::new("/nonexistent/orders.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn bad_date_reports_row_and_value() {
        let file = write_csv(&[
            "10107,30,95.70,2/24/2003 0:00,Shipped,Motorcycles,S10_1678",
            "10121,34,81.35,not-a-date,Shipped,Motorcycles,S10_1678",
        ]);

        let err = load_orders(file.path()).unwrap_err();
        match err {
            LoadError::Date { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected Date error, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantity_is_csv_error() {
        let file = write_csv(&["10107,-5,95.70,2/24/2003 0:00,Shipped,Motorcycles,S10_1678"]);
        let err = load_orders(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
