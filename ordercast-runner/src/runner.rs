//! Evaluation runner — wires together loading, aggregation, calendar
//! features, the split, and the forecast.
//!
//! One entry point: `run_evaluation()`, used by the CLI. Every stage is a
//! synchronous pass over the previous stage's table; the first failure
//! aborts the run and names the failing stage.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ordercast_core::aggregate::aggregate_daily;
use ordercast_core::calendar::{derive_calendar_fields, HolidaySet};
use ordercast_core::data::LoadError;
use ordercast_core::domain::AugmentedSeries;
use ordercast_core::stats::trailing_mean;

use crate::config::{ConfigError, EvalConfig};
use crate::data_loader::{resolve_orders, LoadedOrders};
use crate::forecast::{mean_absolute_error, persistence_forecast, ForecastError};
use crate::split::split_at;

/// Errors from the runner, naming the failing stage.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("aggregation produced an empty series")]
    EmptySeries,

    #[error("split produced an empty training range (no days before {cutoff})")]
    EmptyTrain { cutoff: NaiveDate },

    #[error("split produced an empty test range (no days on or after {cutoff})")]
    EmptyTest { cutoff: NaiveDate },

    #[error("forecast error: {0}")]
    Forecast(#[from] ForecastError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// One scored test point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub actual: u64,
    pub forecast: f64,
    pub abs_error: f64,
}

/// Complete result of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub csv_path: String,
    pub cutoff_date: NaiveDate,
    pub window: usize,
    pub dataset_hash: String,
    pub has_synthetic: bool,
    pub record_count: usize,
    pub day_count: usize,
    pub train_days: usize,
    pub test_days: usize,
    /// Holiday calendar years used for the holiday flag.
    pub calendar_years: Vec<i32>,
    /// Last defined trailing mean of the training range (the forecast).
    pub last_train_ma: f64,
    /// Mean absolute error of the persistence forecast over the test range.
    pub mae: f64,
    /// The full augmented daily series.
    pub series: AugmentedSeries,
    /// Per-point test forecasts.
    pub forecast: Vec<ForecastPoint>,
}

/// Default schema version for deserializing older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Options controlling order resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Generate synthetic orders when the CSV is missing.
    pub synthetic: bool,
}

/// Run the full evaluation pipeline.
///
/// Validates the config first, so a hand-built `EvalConfig` that never went
/// through `from_toml` still fails with `RunError::Config` rather than
/// panicking downstream.
pub fn run_evaluation(config: &EvalConfig, opts: &RunOptions) -> Result<EvalResult, RunError> {
    config.validate()?;
    let cutoff = config.cutoff()?;
    let window = config.evaluation.window;

    let loaded: LoadedOrders = resolve_orders(Path::new(&config.data.csv_path), opts.synthetic)?;

    let series = aggregate_daily(&loaded.records);
    if series.is_empty() {
        return Err(RunError::EmptySeries);
    }

    let calendar_years = config
        .calendar
        .years
        .clone()
        .unwrap_or_else(|| series.years());
    let holidays = HolidaySet::for_years(&calendar_years);
    let augmented = derive_calendar_fields(&series, &holidays);

    let (train, test) = split_at(&augmented, cutoff);
    if train.is_empty() {
        return Err(RunError::EmptyTrain { cutoff });
    }
    if test.is_empty() {
        return Err(RunError::EmptyTest { cutoff });
    }

    let train_ma = trailing_mean(&train.quantities(), window);
    let forecast_values = persistence_forecast(&train_ma, test.len(), window)?;
    let actual = test.quantities();
    let mae = mean_absolute_error(&actual, &forecast_values)?;
    let last_train_ma = forecast_values[0];

    let forecast = test
        .points
        .iter()
        .zip(&forecast_values)
        .map(|(point, &value)| ForecastPoint {
            date: point.date,
            actual: point.total_quantity,
            forecast: value,
            abs_error: (point.total_quantity as f64 - value).abs(),
        })
        .collect();

    let has_synthetic = loaded.has_synthetic();
    Ok(EvalResult {
        schema_version: SCHEMA_VERSION,
        csv_path: config.data.csv_path.clone(),
        cutoff_date: cutoff,
        window,
        dataset_hash: loaded.dataset_hash,
        has_synthetic,
        record_count: loaded.records.len(),
        day_count: augmented.len(),
        train_days: train.len(),
        test_days: test.len(),
        calendar_years,
        last_train_ma,
        mae,
        series: augmented,
        forecast,
    })
}
