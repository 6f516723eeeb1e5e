use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Forecast HTTP request failed")]
    Network(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse forecast JSON")]
    Json(#[from] serde_json::Error),

    #[error("Forecast JSON contained an empty `properties.timeseries` array")]
    EmptyTimeseries,

    #[error("'{0}' is not a temperature in Celsius")]
    InvalidInput(String),

    #[error("History file {} contains non-numeric value '{token}'", path.display())]
    CorruptHistory { path: PathBuf, token: String },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True for failures that happened before a forecast body was obtained.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Status { .. })
    }
}
