use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";
pub const DEFAULT_USER_AGENT: &str =
    concat!("yrdiff/", env!("CARGO_PKG_VERSION"), " (+https://github.com/yrdiff/yrdiff)");

/// Where and how the forecast is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub user_agent: String,
    /// Request timeout; no timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        // Oslo, Blindern.
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            latitude: 59.93,
            longitude: 10.73,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the history files. Current directory when absent.
    pub data_dir: Option<PathBuf>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [forecast]
/// latitude = 59.93
/// longitude = 10.73
///
/// [storage]
/// data_dir = "/home/me/weather"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastSettings,
    pub storage: StorageSettings,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "yrdiff", "yrdiff")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.forecast;
        if !(-90.0..=90.0).contains(&f.latitude) {
            return Err(anyhow!("Latitude {} is outside -90..=90", f.latitude));
        }
        if !(-180.0..=180.0).contains(&f.longitude) {
            return Err(anyhow!("Longitude {} is outside -180..=180", f.longitude));
        }
        if f.user_agent.trim().is_empty() {
            return Err(anyhow!("User agent must not be empty; api.met.no requires one"));
        }
        Ok(())
    }

    /// Full request URL, e.g. `...compact?lat=59.93&lon=10.73`.
    pub fn forecast_url(&self) -> String {
        format!(
            "{}?lat={}&lon={}",
            self.forecast.base_url, self.forecast.latitude, self.forecast.longitude
        )
    }

    /// Data directory, with an optional command-line override taking precedence.
    pub fn data_dir(&self, override_dir: Option<PathBuf>) -> PathBuf {
        override_dir
            .or_else(|| self.storage.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
