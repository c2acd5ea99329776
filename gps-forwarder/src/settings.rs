use std::time::Duration;

use config::ConfigError;
use fleet_core::{Credentials, Environment, LogLevel, load_settings};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    #[serde(default)]
    pub log_level: LogLevel,
    pub serial_port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    pub api_url: String,
    pub credentials: Credentials,
    /// Vessel name used for bare NMEA sentences and key-value lines without `BOAT=`.
    #[serde(default = "default_boat")]
    pub default_boat: String,
    #[serde(with = "humantime_serde", default = "default_reconnect_delay")]
    pub reconnect_delay: Duration,
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_boat() -> String {
    "Endurance".into()
}

fn default_reconnect_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(8)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        load_settings("GPS_FORWARDER")
    }
}
