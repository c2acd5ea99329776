use std::time::Duration;

use config::ConfigError;
use fleet_core::{Environment, LogLevel, load_settings};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    #[serde(default)]
    pub log_level: LogLevel,
    pub api: ApiSettings,
    /// Base url of the fleet backend every route is forwarded to.
    pub backend_url: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub ip: String,
    pub port: u16,
    pub num_workers: Option<u32>,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        load_settings("FLEET_PROXY")
    }
}

impl ApiSettings {
    pub fn listener_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
