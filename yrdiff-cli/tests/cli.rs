mod common;

use common::{TestEnv, compact, forecast_server};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("record"))
        .stdout(contains("history"))
        .stdout(contains("configure"));
}

#[test]
fn history_on_empty_dir() {
    let env = TestEnv::new();
    env.cmd()
        .arg("history")
        .arg("--data-dir")
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("No readings recorded"));
}

#[test]
fn history_summarizes_existing_files() {
    let env = TestEnv::new();
    env.write_history("user_measurement.json", "3");
    env.write_history("yr_weather_day.json", "8");
    env.write_history("weather_data_daily.json", "1,2,3,4,5,6,7,8");
    env.write_history("weather_data_weekly.json", "1,1.5");
    env.write_history("weather_data_monthly.json", "0");

    env.cmd()
        .arg("history")
        .arg("--data-dir")
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("Last user reading: 3 Celsius"))
        .stdout(contains("Daily readings: 8 (average 4.5 Celsius)"))
        .stdout(contains("Average of the last 7 readings: 5 Celsius"))
        .stdout(contains("Weekly entries: 2, monthly entries: 1"));
}

#[test]
fn history_shows_zero_rolling_average() {
    let env = TestEnv::new();
    env.write_history("weather_data_daily.json", "5,1,-1,0,0,0,0,0");

    env.cmd()
        .arg("history")
        .arg("--data-dir")
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("Average of the last 7 readings: 0 Celsius"));
}

#[test]
fn history_hides_rolling_average_for_short_series() {
    let env = TestEnv::new();
    env.write_history("weather_data_daily.json", "1,2,3,4,5,6,7");

    env.cmd()
        .arg("history")
        .arg("--data-dir")
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("Daily readings: 7"))
        .stdout(contains("last 7 readings").not());
}

#[test]
fn history_fails_on_corrupt_file() {
    let env = TestEnv::new();
    env.write_history("weather_data_daily.json", "1,two,3");

    env.cmd()
        .arg("history")
        .arg("--data-dir")
        .arg(env.data_arg())
        .assert()
        .failure()
        .stderr(contains("non-numeric value 'two'"));
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_rejects_invalid_temperature_flag() {
    let env = TestEnv::new();
    let server = forecast_server(200, &compact(5.2)).await;
    env.use_server(&server);

    env.cmd()
        .args(["record", "--temperature", "warm", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .failure()
        .stderr(contains("'warm' is not a temperature"));

    assert!(!env.data.join("weather_data_daily.json").exists());
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_writes_history_files() {
    let env = TestEnv::new();
    let server = forecast_server(200, &compact(5.2)).await;
    env.use_server(&server);
    env.write_history("weather_data_daily.json", "4.8");

    env.cmd()
        .args(["record", "--temperature", "3.0", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("YR forecast"))
        .stdout(contains("Difference between user temperature and YR data: 2.2 Celsius"))
        .stdout(contains("Average of 2 daily readings: 5 Celsius"));

    assert_eq!(env.read_history("user_measurement.json"), "3");
    assert_eq!(env.read_history("yr_weather_day.json"), "5.2");
    assert_eq!(env.read_history("weather_data_daily.json"), "4.8,5.2");
    assert_eq!(env.read_history("weather_data_monthly.json"), "0");
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_reads_piped_stdin() {
    let env = TestEnv::new();
    let server = forecast_server(200, &compact(5.2)).await;
    env.use_server(&server);

    env.cmd()
        .args(["record", "--data-dir"])
        .arg(env.data_arg())
        .write_stdin("6,2\n")
        .assert()
        .success()
        .stdout(contains("Enter user measurements"))
        .stdout(contains("Difference between user temperature and YR data: 1 Celsius"));

    assert_eq!(env.read_history("user_measurement.json"), "6.2");
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_reports_fetch_failure_and_exits_cleanly() {
    let env = TestEnv::new();
    let server = forecast_server(503, "{}").await;
    env.use_server(&server);

    env.cmd()
        .args(["record", "--temperature", "3", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("Failed to fetch YR weather data. Please check the API URL."))
        .stderr(contains("503"));

    assert!(!env.data.join("user_measurement.json").exists());
    assert!(!env.data.join("weather_data_daily.json").exists());
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_with_malformed_forecast_fails() {
    let env = TestEnv::new();
    let server = forecast_server(200, r#"{"properties":{"timeseries":[]}}"#).await;
    env.use_server(&server);

    env.cmd()
        .args(["record", "--temperature", "3", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .failure()
        .stderr(contains("Failed to read temperature from YR forecast"));
}

#[cfg(target_os = "linux")]
#[tokio::test(flavor = "multi_thread")]
async fn record_shows_zero_rolling_average() {
    let env = TestEnv::new();
    let server = forecast_server(200, &compact(0.0)).await;
    env.use_server(&server);
    env.write_history("weather_data_daily.json", "0,0,0,0,0,0,0");

    env.cmd()
        .args(["record", "--temperature", "1", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .success()
        .stdout(contains("Average of the last 7 readings: 0 Celsius"));

    assert_eq!(env.read_history("weather_data_daily.json"), "0,0,0,0,0,0,0,0");
}

#[cfg(target_os = "linux")]
#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    env.write_config("[forecast]\nlatitude = 300.0\n");

    env.cmd()
        .args(["history", "--data-dir"])
        .arg(env.data_arg())
        .assert()
        .failure()
        .stderr(contains("Failed to parse config file"));
}
