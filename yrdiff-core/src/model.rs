use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Air temperature at the first timestep of a fetched forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastReading {
    pub temperature_c: f64,
    /// Timestep the value belongs to, when the API supplied one.
    pub time: Option<DateTime<Utc>>,
}

/// Outcome of one `record` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub forecast: ForecastReading,
    pub user_c: f64,
    pub difference_c: f64,
    /// Mean over every recorded daily value.
    pub weekly_average: f64,
    /// Mean over the trailing window, or zero while the history is too short.
    pub monthly_average: f64,
    pub daily_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub last_user_c: Option<f64>,
    pub last_forecast_c: Option<f64>,
    pub daily: Vec<f64>,
    pub daily_mean: f64,
    pub rolling_mean: f64,
    pub weekly_entries: usize,
    pub monthly_entries: usize,
}
