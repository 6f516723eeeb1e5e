//! Core library for the `yrdiff` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The met.no (YR) forecast provider and temperature extraction
//! - Comma-separated history files and the aggregates kept in them
//! - The session that ties a forecast, a user reading and the history together
//!
//! It is used by `yrdiff-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod session;
pub mod stats;

pub use config::{Config, ForecastSettings, StorageSettings};
pub use error::{Error, Result};
pub use history::{FileHistoryStore, HistoryFile, HistoryStore, MemoryHistoryStore};
pub use model::{ForecastReading, HistorySummary, RunReport};
pub use provider::{FixedProvider, ForecastProvider, YrProvider};
pub use session::{Session, parse_user_temperature, summarize};
