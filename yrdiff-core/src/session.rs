use tracing::debug;

use crate::{
    Error, Result,
    history::{HistoryFile, HistoryStore},
    model::{ForecastReading, HistorySummary, RunReport},
    provider::ForecastProvider,
    stats::{self, ROLLING_WINDOW},
};

/// Parse a line typed by the user as a Celsius value.
///
/// A single `,` is accepted as decimal separator (`"3,5"` is 3.5).
pub fn parse_user_temperature(line: &str) -> Result<f64> {
    let trimmed = line.trim();
    let normalized = if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidInput(trimmed.to_string())),
    }
}

/// One fetch / compare / record pass against a provider and a history store.
#[derive(Debug)]
pub struct Session<P, S> {
    provider: P,
    store: S,
}

impl<P: ForecastProvider, S: HistoryStore> Session<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub async fn fetch_forecast(&self) -> Result<ForecastReading> {
        self.provider.current_reading().await
    }

    /// Persist both readings and the running aggregates.
    ///
    /// Naming follows the files on disk, not the windows: the "weekly" value is
    /// the mean over every daily value ever recorded, and the "monthly" value is
    /// the mean of the last seven. Both are kept as-is for compatibility with
    /// existing history.
    pub fn record(&mut self, forecast: ForecastReading, user_c: f64) -> Result<RunReport> {
        let difference_c = stats::difference(user_c, forecast.temperature_c);

        // Fail on a corrupt daily series before anything is overwritten.
        self.store.read(HistoryFile::Daily)?;

        self.store.save(HistoryFile::UserMeasurement, user_c)?;
        self.store.save(HistoryFile::YrWeatherDay, forecast.temperature_c)?;
        self.store.append(HistoryFile::Daily, forecast.temperature_c)?;

        let daily = self.store.read(HistoryFile::Daily)?;
        let weekly_average = stats::average(&daily);
        let monthly_average = stats::last_n_average(&daily, ROLLING_WINDOW);
        debug!(daily = daily.len(), weekly_average, monthly_average, "Aggregates computed");

        self.store.append(HistoryFile::Weekly, weekly_average)?;
        self.store.append(HistoryFile::Monthly, monthly_average)?;

        Ok(RunReport {
            forecast,
            user_c,
            difference_c,
            weekly_average,
            monthly_average,
            daily_count: daily.len(),
        })
    }

    /// Fetch, then record against an already known user reading.
    pub async fn run(&mut self, user_c: f64) -> Result<RunReport> {
        let forecast = self.fetch_forecast().await?;
        self.record(forecast, user_c)
    }

    pub fn summary(&self) -> Result<HistorySummary> {
        summarize(&self.store)
    }
}

/// Read-only view over a store; needs no provider.
pub fn summarize<S: HistoryStore + ?Sized>(store: &S) -> Result<HistorySummary> {
    let daily = store.read(HistoryFile::Daily)?;

    Ok(HistorySummary {
        last_user_c: store.read(HistoryFile::UserMeasurement)?.last().copied(),
        last_forecast_c: store.read(HistoryFile::YrWeatherDay)?.last().copied(),
        daily_mean: stats::average(&daily),
        rolling_mean: stats::last_n_average(&daily, ROLLING_WINDOW),
        weekly_entries: store.read(HistoryFile::Weekly)?.len(),
        monthly_entries: store.read(HistoryFile::Monthly)?.len(),
        daily,
    })
}
