//! Naive persistence forecast and its error metric.
//!
//! The forecast for every test point is the last defined trailing-mean
//! value of the training range, carried forward as a constant. No rolling
//! recomputation into the test range.

use thiserror::Error;

/// Errors from forecasting and scoring.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(
        "training range has no defined moving average ({train_days} days < window {window})"
    )]
    NoDefinedAverage { window: usize, train_days: usize },

    #[error("cannot score an empty test range")]
    EmptyTest,

    #[error("actual and forecast lengths differ: {actual} vs {forecast}")]
    LengthMismatch { actual: usize, forecast: usize },
}

/// Last defined (non-NaN) value of a trailing-mean series.
pub fn last_defined(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| !v.is_nan())
}

/// Constant carry-forward forecast over `test_len` points.
///
/// `window` is only reported in the error when the training range never
/// reaches a defined average.
pub fn persistence_forecast(
    train_ma: &[f64],
    test_len: usize,
    window: usize,
) -> Result<Vec<f64>, ForecastError> {
    if test_len == 0 {
        return Err(ForecastError::EmptyTest);
    }
    let last = last_defined(train_ma).ok_or(ForecastError::NoDefinedAverage {
        window,
        train_days: train_ma.len(),
    })?;
    Ok(vec![last; test_len])
}

/// Mean absolute error over paired actual/forecast values.
pub fn mean_absolute_error(actual: &[f64], forecast: &[f64]) -> Result<f64, ForecastError> {
    if actual.len() != forecast.len() {
        return Err(ForecastError::LengthMismatch {
            actual: actual.len(),
            forecast: forecast.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::EmptyTest);
    }
    let total: f64 = actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f).abs())
        .sum();
    Ok(total / actual.len() as f64)
}
