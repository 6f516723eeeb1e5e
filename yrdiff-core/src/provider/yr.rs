use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    Error, Result,
    config::ForecastSettings,
    model::ForecastReading,
};

use super::ForecastProvider;

/// met.no locationforecast client for one fixed coordinate.
#[derive(Debug, Clone)]
pub struct YrProvider {
    base_url: String,
    latitude: f64,
    longitude: f64,
    http: Client,
}

impl YrProvider {
    pub fn new(settings: &ForecastSettings) -> Result<Self> {
        // api.met.no rejects requests without an identifying User-Agent.
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url: settings.base_url.clone(),
            latitude: settings.latitude,
            longitude: settings.longitude,
            http: builder.build()?,
        })
    }

    /// GET the compact forecast and return the raw body.
    pub async fn fetch_forecast(&self) -> Result<String> {
        debug!(
            url = %self.base_url,
            lat = self.latitude,
            lon = self.longitude,
            "Requesting forecast"
        );

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Status { status, body: truncate_body(&body) });
        }

        debug!(bytes = body.len(), "Forecast received");
        Ok(body)
    }
}

#[async_trait]
impl ForecastProvider for YrProvider {
    async fn current_reading(&self) -> Result<ForecastReading> {
        let body = self.fetch_forecast().await?;
        let reading = extract_temperature(&body)?;
        debug!(temperature_c = reading.temperature_c, time = ?reading.time, "Parsed forecast");
        Ok(reading)
    }
}

#[derive(Debug, Deserialize)]
struct YrForecast {
    properties: YrProperties,
}

#[derive(Debug, Deserialize)]
struct YrProperties {
    // Later timesteps are never inspected, so they stay untyped.
    timeseries: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YrTimestep {
    #[serde(default)]
    time: Option<DateTime<Utc>>,
    data: YrData,
}

#[derive(Debug, Deserialize)]
struct YrData {
    instant: YrInstant,
}

#[derive(Debug, Deserialize)]
struct YrInstant {
    details: YrDetails,
}

#[derive(Debug, Deserialize)]
struct YrDetails {
    air_temperature: f64,
}

/// Pull `properties.timeseries[0].data.instant.details.air_temperature` out of a
/// locationforecast body.
pub fn extract_temperature(json: &str) -> Result<ForecastReading> {
    let parsed: YrForecast = serde_json::from_str(json)?;

    let first = parsed
        .properties
        .timeseries
        .into_iter()
        .next()
        .ok_or(Error::EmptyTimeseries)?;

    let step: YrTimestep = serde_json::from_value(first)?;

    Ok(ForecastReading {
        temperature_c: step.data.instant.details.air_temperature,
        time: step.time,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
