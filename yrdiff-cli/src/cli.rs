use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Text, validator::Validation};
use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
};
use tracing::warn;
use yrdiff_core::{
    Config, FileHistoryStore, ForecastReading, RunReport, Session, YrProvider,
    parse_user_temperature, stats::ROLLING_WINDOW, summarize,
};

const PROMPT: &str = "Enter user measurements (temperature in Celsius):";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "yrdiff",
    version,
    about = "Compare your own thermometer against the YR forecast"
)]
pub struct Cli {
    /// Log progress to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `record`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the forecast, read your measurement and record both.
    Record {
        /// Your reading in Celsius; prompted for when absent.
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<String>,

        /// Directory holding the history files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show what has been recorded so far.
    History {
        /// Directory holding the history files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Interactively set location, user agent and data directory.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Record { temperature: None, data_dir: None }) {
            Command::Record { temperature, data_dir } => record(temperature, data_dir).await,
            Command::History { data_dir } => history(data_dir),
            Command::Configure => configure(),
        }
    }
}

async fn record(temperature: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let provider = YrProvider::new(&config.forecast).context("Failed to build HTTP client")?;
    let store = FileHistoryStore::new(config.data_dir(data_dir));
    let mut session = Session::new(provider, store);

    let forecast = match session.fetch_forecast().await {
        Ok(forecast) => forecast,
        // Unreachable API is not an error exit: report it and stop.
        Err(e) if e.is_fetch_failure() => {
            let cause = format!("{:#}", anyhow::Error::new(e));
            warn!(url = %config.forecast_url(), error = %cause, "Forecast fetch failed");
            println!("Failed to fetch YR weather data. Please check the API URL.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read temperature from YR forecast"),
    };

    println!("YR forecast{}: {} Celsius", forecast_time(&forecast), forecast.temperature_c);

    let user_c = match temperature {
        Some(text) => parse_user_temperature(&text)?,
        None => prompt_temperature()?,
    };

    let report = session.record(forecast, user_c).with_context(|| {
        format!("Failed to update history in {}", session.store().dir().display())
    })?;

    print_report(&report);
    Ok(())
}

fn forecast_time(forecast: &ForecastReading) -> String {
    forecast
        .time
        .map(|t| format!(" at {}", t.with_timezone(&Local).format("%Y-%m-%d %H:%M")))
        .unwrap_or_default()
}

fn prompt_temperature() -> Result<f64> {
    // Piped input: take one line, like a plain console read.
    if !io::stdin().is_terminal() {
        println!("{PROMPT}");
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).context("Failed to read from stdin")?;
        return Ok(parse_user_temperature(&line)?);
    }

    let answer = Text::new(PROMPT)
        .with_validator(|s: &str| -> Result<Validation, CustomUserError> {
            Ok(match parse_user_temperature(s) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()?;

    Ok(parse_user_temperature(&answer)?)
}

fn print_report(report: &RunReport) {
    println!(
        "Difference between user temperature and YR data: {} Celsius",
        format_celsius(report.difference_c)
    );
    println!(
        "Average of {} daily readings: {} Celsius",
        report.daily_count,
        format_celsius(report.weekly_average)
    );
    if report.daily_count > ROLLING_WINDOW {
        println!(
            "Average of the last {ROLLING_WINDOW} readings: {} Celsius",
            format_celsius(report.monthly_average)
        );
    }
}

fn history(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let store = FileHistoryStore::new(config.data_dir(data_dir));
    let summary = summarize(&store)
        .with_context(|| format!("Failed to read history in {}", store.dir().display()))?;

    if summary.daily.is_empty() {
        println!("No readings recorded in {}", store.dir().display());
        return Ok(());
    }

    if let Some(user) = summary.last_user_c {
        println!("Last user reading: {} Celsius", format_celsius(user));
    }
    if let Some(forecast) = summary.last_forecast_c {
        println!("Last YR reading: {} Celsius", format_celsius(forecast));
    }
    println!(
        "Daily readings: {} (average {} Celsius)",
        summary.daily.len(),
        format_celsius(summary.daily_mean)
    );
    if summary.daily.len() > ROLLING_WINDOW {
        println!(
            "Average of the last {ROLLING_WINDOW} readings: {} Celsius",
            format_celsius(summary.rolling_mean)
        );
    }
    println!(
        "Weekly entries: {}, monthly entries: {}",
        summary.weekly_entries, summary.monthly_entries
    );

    Ok(())
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    cfg.forecast.latitude = CustomType::<f64>::new("Latitude:")
        .with_default(cfg.forecast.latitude)
        .with_error_message("Please type a decimal number")
        .prompt()?;

    cfg.forecast.longitude = CustomType::<f64>::new("Longitude:")
        .with_default(cfg.forecast.longitude)
        .with_error_message("Please type a decimal number")
        .prompt()?;

    let user_agent = cfg.forecast.user_agent.clone();
    cfg.forecast.user_agent =
        Text::new("User agent sent to api.met.no:").with_default(&user_agent).prompt()?;

    let current_dir = cfg
        .storage
        .data_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let data_dir = Text::new("Data directory (empty for the current directory):")
        .with_default(&current_dir)
        .prompt()?;
    cfg.storage.data_dir =
        if data_dir.trim().is_empty() { None } else { Some(PathBuf::from(data_dir.trim())) };

    cfg.validate()?;
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Round to two decimals for display; stored values keep full precision.
fn format_celsius(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0".
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}
