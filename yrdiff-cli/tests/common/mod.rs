#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path, query_param},
};

pub const FORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/compact";

pub fn compact(air_temperature: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{"meta":{{"updated_at":"2024-03-01T10:12:44Z"}},"timeseries":[{{"time":"2024-03-01T11:00:00Z","data":{{"instant":{{"details":{{"air_temperature":{air_temperature}}}}}}}}}]}}}}"#
    )
}

/// Isolated HOME / XDG dirs plus a data directory for history files.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub config_home: PathBuf,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let config_home = tmp.path().join("config");
        let data = tmp.path().join("data");
        for dir in [&home, &config_home, &data] {
            fs::create_dir_all(dir).expect("create isolated dir");
        }

        Self { _tmp: tmp, home, config_home, data }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("yrdiff").unwrap();
        cmd.env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `config.toml` where `directories` looks for it on Linux.
    pub fn write_config(&self, toml: &str) {
        let dir = self.config_home.join("yrdiff");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), toml).expect("write config");
    }

    /// Point the forecast at a mock server.
    pub fn use_server(&self, server: &MockServer) {
        self.write_config(&format!(
            "[forecast]\nbase_url = \"{}{FORECAST_PATH}\"\n",
            server.uri()
        ));
    }

    pub fn write_history(&self, name: &str, text: &str) {
        fs::write(self.data.join(name), text).expect("write history file");
    }

    pub fn read_history(&self, name: &str) -> String {
        fs::read_to_string(self.data.join(name)).expect("read history file")
    }

    pub fn data_arg(&self) -> &Path {
        &self.data
    }
}

/// Mock met.no endpoint for the default Oslo coordinate.
pub async fn forecast_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("lat", "59.93"))
        .and(query_param("lon", "10.73"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}
