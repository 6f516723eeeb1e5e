//! Arithmetic over readings and history series.

/// Number of trailing daily values used for the rolling average.
pub const ROLLING_WINDOW: usize = 7;

/// Absolute difference between two Celsius readings.
pub fn difference(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Arithmetic mean; `0.0` for an empty series.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the last `n` values.
///
/// Returns `0.0` unless the series holds *more* than `n` values, so a series of
/// exactly `n` values still yields zero. Existing history files were produced
/// with this gate, so it is kept.
pub fn last_n_average(values: &[f64], n: usize) -> f64 {
    if n == 0 || values.len() <= n {
        return 0.0;
    }
    average(&values[values.len() - n..])
}
