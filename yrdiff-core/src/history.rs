//! Comma-separated scalar history files.
//!
//! Every file holds plain `f64` values joined by `,` (e.g. `5.2,3,-1.4`). The
//! `.json` suffix is historical; once a file holds more than one value it is not
//! valid JSON. There is no locking: two concurrent runs can lose an append.

use std::{
    collections::HashMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryFile {
    /// Latest user reading only.
    UserMeasurement,
    /// Latest forecast reading only.
    YrWeatherDay,
    /// Every forecast reading ever recorded.
    Daily,
    Weekly,
    Monthly,
}

impl HistoryFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            HistoryFile::UserMeasurement => "user_measurement.json",
            HistoryFile::YrWeatherDay => "yr_weather_day.json",
            HistoryFile::Daily => "weather_data_daily.json",
            HistoryFile::Weekly => "weather_data_weekly.json",
            HistoryFile::Monthly => "weather_data_monthly.json",
        }
    }
}

impl fmt::Display for HistoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Persistence for readings and aggregates.
pub trait HistoryStore {
    /// Replace the file contents with a single value.
    fn save(&mut self, file: HistoryFile, value: f64) -> Result<()>;

    /// Append `value` to the series, creating it if needed.
    fn append(&mut self, file: HistoryFile, value: f64) -> Result<()>;

    /// Every value in the series; empty when the file does not exist.
    fn read(&self, file: HistoryFile) -> Result<Vec<f64>>;
}

/// Shortest text that parses back to the same `f64` (`3.0` is written as `3`).
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// Blank existing text counts as an empty series, so no leading `,` is written.
fn appended(existing: Option<&str>, value: f64) -> String {
    match existing {
        Some(text) if !text.trim().is_empty() => format!("{text},{}", format_value(value)),
        _ => format_value(value),
    }
}

/// Split on `,` and parse every token. Blank input is an empty series.
pub fn parse_series(text: &str, path: &Path) -> Result<Vec<f64>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| Error::CorruptHistory {
                path: path.to_path_buf(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// History files rooted in one directory.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    dir: PathBuf,
}

impl FileHistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: HistoryFile) -> PathBuf {
        self.dir.join(file.file_name())
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        }
        fs::write(path, text).map_err(|e| Error::io(path, e))
    }
}

impl HistoryStore for FileHistoryStore {
    fn save(&mut self, file: HistoryFile, value: f64) -> Result<()> {
        let path = self.path(file);
        self.write_text(&path, &format_value(value))?;
        info!("Saved data in file: {}", path.display());
        Ok(())
    }

    fn append(&mut self, file: HistoryFile, value: f64) -> Result<()> {
        let path = self.path(file);
        let existing = self.read_text(&path)?;
        let created = existing.is_none();

        self.write_text(&path, &appended(existing.as_deref(), value))?;

        if created {
            info!("Saved data in file: {}", path.display());
        } else {
            info!("Updated data for {}", path.display());
        }
        Ok(())
    }

    fn read(&self, file: HistoryFile) -> Result<Vec<f64>> {
        let path = self.path(file);
        match self.read_text(&path)? {
            Some(text) => parse_series(&text, &path),
            None => Ok(Vec::new()),
        }
    }
}

/// Same text semantics as [`FileHistoryStore`], kept in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    files: HashMap<HistoryFile, String>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text of a file, as it would appear on disk.
    pub fn contents(&self, file: HistoryFile) -> Option<&str> {
        self.files.get(&file).map(String::as_str)
    }

    pub fn insert_raw(&mut self, file: HistoryFile, text: impl Into<String>) {
        self.files.insert(file, text.into());
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&mut self, file: HistoryFile, value: f64) -> Result<()> {
        self.files.insert(file, format_value(value));
        Ok(())
    }

    fn append(&mut self, file: HistoryFile, value: f64) -> Result<()> {
        let text = appended(self.contents(file), value);
        self.files.insert(file, text);
        Ok(())
    }

    fn read(&self, file: HistoryFile) -> Result<Vec<f64>> {
        match self.contents(file) {
            Some(text) => parse_series(text, Path::new(file.file_name())),
            None => Ok(Vec::new()),
        }
    }
}
