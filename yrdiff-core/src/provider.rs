use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Result, model::ForecastReading};

pub mod yr;

pub use yr::{YrProvider, extract_temperature};

/// Source of the forecast temperature a user reading is compared against.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current_reading(&self) -> Result<ForecastReading>;
}

/// Provider returning a fixed reading. Used by tests and dry runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedProvider(pub ForecastReading);

impl FixedProvider {
    pub fn celsius(temperature_c: f64) -> Self {
        Self(ForecastReading { temperature_c, time: None })
    }
}

#[async_trait]
impl ForecastProvider for FixedProvider {
    async fn current_reading(&self) -> Result<ForecastReading> {
        Ok(self.0)
    }
}
