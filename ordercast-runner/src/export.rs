//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Artifact set per run: `manifest.json` (full result round-trip),
//! `daily_series.csv` (augmented series), `forecast.csv` (scored test
//! points), and `report.md` (human-readable summary). All persisted JSON
//! includes a `schema_version` field; newer versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use ordercast_core::domain::{AugmentedSeries, OrderRecord};

use crate::runner::{EvalResult, ForecastPoint, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `EvalResult` to pretty JSON.
pub fn export_json(result: &EvalResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize EvalResult to JSON")
}

/// Deserialize an `EvalResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<EvalResult> {
    let result: EvalResult =
        serde_json::from_str(json).context("failed to deserialize EvalResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the augmented daily series as CSV.
///
/// Columns: index, date, year, half, quarter, month, day, weekday, holiday
/// (1/0), total_quantity.
pub fn export_series_csv(series: &AugmentedSeries) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "index",
        "date",
        "year",
        "half",
        "quarter",
        "month",
        "day",
        "weekday",
        "holiday",
        "total_quantity",
    ])?;

    for p in &series.points {
        wtr.write_record([
            &p.index.to_string(),
            &p.date.to_string(),
            &p.year.to_string(),
            &p.half.to_string(),
            &p.quarter.to_string(),
            &p.month,
            &p.day.to_string(),
            &p.weekday,
            &if p.holiday { "1" } else { "0" }.to_string(),
            &p.total_quantity.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export scored test points as CSV.
///
/// Columns: date, actual, forecast, abs_error.
pub fn export_forecast_csv(points: &[ForecastPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "actual", "forecast", "abs_error"])?;
    for p in points {
        wtr.write_record([
            &p.date.to_string(),
            &p.actual.to_string(),
            &format!("{:.4}", p.forecast),
            &format!("{:.4}", p.abs_error),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export order records as a CSV the loader accepts.
///
/// Used by the `synthetic` command to write demo order files.
pub fn export_orders_csv(records: &[OrderRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "ORDERNUMBER",
        "QUANTITYORDERED",
        "PRICEEACH",
        "ORDERDATE",
        "STATUS",
        "PRODUCTLINE",
        "PRODUCTCODE",
    ])?;

    for r in records {
        wtr.write_record([
            &r.order_number.to_string(),
            &r.quantity.to_string(),
            &format!("{:.2}", r.unit_price),
            &r.order_date.format("%-m/%-d/%Y %-H:%M").to_string(),
            &r.status,
            &r.product_line,
            &r.product_code,
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

const REPORT_PREVIEW_ROWS: usize = 10;

/// Render a human-readable run report.
pub fn render_markdown(result: &EvalResult) -> String {
    let mut md = String::new();

    md.push_str("# Ordercast evaluation report\n\n");
    if result.has_synthetic {
        md.push_str("> **WARNING**: results based on SYNTHETIC data\n\n");
    }

    md.push_str("## Run\n\n");
    md.push_str(&format!("- Input: `{}`\n", result.csv_path));
    md.push_str(&format!("- Dataset hash: `{}`\n", result.dataset_hash));
    md.push_str(&format!(
        "- Records: {} over {} trading days\n",
        result.record_count, result.day_count
    ));
    md.push_str(&format!("- Calendar years: {:?}\n", result.calendar_years));
    md.push_str(&format!(
        "- Cutoff: {} (window {} days)\n\n",
        result.cutoff_date, result.window
    ));

    md.push_str("## Evaluation\n\n");
    md.push_str(&format!("- Train days: {}\n", result.train_days));
    md.push_str(&format!("- Test days: {}\n", result.test_days));
    md.push_str(&format!(
        "- Last train moving average: {:.2}\n",
        result.last_train_ma
    ));
    md.push_str(&format!("- **Mean absolute error: {:.2}**\n\n", result.mae));

    md.push_str("## Forecast (head)\n\n");
    md.push_str("| date | actual | forecast | abs error |\n");
    md.push_str("|------|--------|----------|-----------|\n");
    for p in result.forecast.iter().take(REPORT_PREVIEW_ROWS) {
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} |\n",
            p.date, p.actual, p.forecast, p.abs_error
        ));
    }
    if result.forecast.len() > REPORT_PREVIEW_ROWS {
        md.push_str(&format!(
            "\n{} more rows in `forecast.csv`.\n",
            result.forecast.len() - REPORT_PREVIEW_ROWS
        ));
    }

    md
}

// ─── Artifact set ───────────────────────────────────────────────────

/// Write the full artifact set under `out_dir`, returning the run directory.
///
/// The run directory is named from the cutoff date and a short dataset-hash
/// prefix, so re-runs of identical inputs land in the same place.
pub fn save_artifacts(result: &EvalResult, out_dir: &Path) -> Result<PathBuf> {
    let short_hash = &result.dataset_hash[..result.dataset_hash.len().min(8)];
    let run_dir = out_dir.join(format!("run_{}_{}", result.cutoff_date, short_hash));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    std::fs::write(run_dir.join("manifest.json"), export_json(result)?)
        .context("failed to write manifest.json")?;
    std::fs::write(
        run_dir.join("daily_series.csv"),
        export_series_csv(&result.series)?,
    )
    .context("failed to write daily_series.csv")?;
    std::fs::write(
        run_dir.join("forecast.csv"),
        export_forecast_csv(&result.forecast)?,
    )
    .context("failed to write forecast.csv")?;
    std::fs::write(run_dir.join("report.md"), render_markdown(result))
        .context("failed to write report.md")?;

    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ordercast_core::calendar::{derive_calendar_fields, HolidaySet};
    use ordercast_core::domain::{DailyPoint, DailySeries};

    fn sample_result() -> EvalResult {
        let daily = DailySeries {
            points: vec![
                DailyPoint {
                    date: NaiveDate::from_ymd_opt(2003, 7, 4).unwrap(),
                    total_quantity: 15,
                },
                DailyPoint {
                    date: NaiveDate::from_ymd_opt(2003, 7, 7).unwrap(),
                    total_quantity: 3,
                },
            ],
        };
        let series = derive_calendar_fields(&daily, &HolidaySet::for_years(&[2003]));

        EvalResult {
            schema_version: SCHEMA_VERSION,
            csv_path: "orders.csv".into(),
            cutoff_date: NaiveDate::from_ymd_opt(2003, 7, 7).unwrap(),
            window: 1,
            dataset_hash: "0123456789abcdef".into(),
            has_synthetic: false,
            record_count: 3,
            day_count: 2,
            train_days: 1,
            test_days: 1,
            calendar_years: vec![2003],
            last_train_ma: 15.0,
            mae: 12.0,
            series,
            forecast: vec![ForecastPoint {
                date: NaiveDate::from_ymd_opt(2003, 7, 7).unwrap(),
                actual: 3,
                forecast: 15.0,
                abs_error: 12.0,
            }],
        }
    }

    #[test]
    fn json_roundtrip_preserves_result() {
        let result = sample_result();
        let json = export_json(&result).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back.mae, result.mae);
        assert_eq!(back.series, result.series);
    }

    #[test]
    fn import_rejects_newer_schema() {
        let mut result = sample_result();
        result.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&result).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn series_csv_encodes_holiday_as_one_zero() {
        let result = sample_result();
        let csv_text = export_series_csv(&result.series).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "index,date,year,half,quarter,month,day,weekday,holiday,total_quantity"
        );
        // 2003-07-04 is Independence Day.
        assert_eq!(lines.next().unwrap(), "0,2003-07-04,2003,2,3,Jul,4,Fri,1,15");
        assert_eq!(lines.next().unwrap(), "1,2003-07-07,2003,2,3,Jul,7,Mon,0,3");
    }

    #[test]
    fn forecast_csv_has_scored_rows() {
        let result = sample_result();
        let csv_text = export_forecast_csv(&result.forecast).unwrap();
        assert!(csv_text.starts_with("date,actual,forecast,abs_error"));
        assert!(csv_text.contains("2003-07-07,3,15.0000,12.0000"));
    }

    #[test]
    fn orders_csv_roundtrips_through_loader() {
        let records = vec![OrderRecord {
            order_date: NaiveDate::from_ymd_opt(2003, 2, 24)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            order_number: 10107,
            quantity: 30,
            unit_price: 95.7,
            product_line: "Motorcycles".into(),
            product_code: "S10_1678".into(),
            status: "Shipped".into(),
        }];

        let csv_text = export_orders_csv(&records).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), &csv_text).unwrap();
        let back = ordercast_core::data::load_orders(file.path()).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn save_artifacts_writes_the_full_set() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&result, dir.path()).unwrap();

        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("daily_series.csv").exists());
        assert!(run_dir.join("forecast.csv").exists());
        assert!(run_dir.join("report.md").exists());

        let report = std::fs::read_to_string(run_dir.join("report.md")).unwrap();
        assert!(report.contains("Mean absolute error: 12.00"));
    }
}
