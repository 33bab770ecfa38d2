//! Series statistics: trailing mean and autocorrelation.
//!
//! Convention: undefined values are `f64::NAN`. The trailing mean is
//! undefined for the first `window - 1` indices; autocorrelation lags are
//! undefined when the series is too short or has zero variance.

/// Right-aligned trailing mean over `window` values, inclusive of the
/// current point.
///
/// `result[i]` is `NaN` for `i < window - 1`, otherwise the mean of
/// `values[i - window + 1 ..= i]`, computed with a rolling sum. Defined
/// values lie within `[min, max]` of the underlying window.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "trailing mean window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = sum / window as f64;
    }

    result
}

/// Autocorrelation function at lags `0..=max_lag`.
///
/// `acf[0]` is 1.0 for any series with nonzero variance. Lags at or beyond
/// the series length, and every lag of a zero-variance series, are `NaN`.
pub fn autocorrelation(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    let mut acf = vec![f64::NAN; max_lag + 1];
    if n == 0 {
        return acf;
    }

    let m = mean(values);
    let denom: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if denom == 0.0 {
        return acf;
    }

    for (lag, slot) in acf.iter_mut().enumerate().take(n.min(max_lag + 1)) {
        let num: f64 = (0..n - lag)
            .map(|i| (values[i] - m) * (values[i + lag] - m))
            .sum();
        *slot = num / denom;
    }

    acf
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. `NaN` for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for statistics tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
