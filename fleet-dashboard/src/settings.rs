use std::time::Duration;

use config::ConfigError;
use fleet_core::{Credentials, Environment, LogLevel, Padding, VesselName, load_settings};
use serde::Deserialize;

use crate::reconciler::{ReconcilerSettings, TrailMode};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    #[serde(default)]
    pub log_level: LogLevel,
    pub api_url: String,
    pub credentials: Option<Credentials>,
    /// Pre-issued token, used instead of logging in when set.
    pub token: Option<String>,
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,
    #[serde(default = "default_frames_limit")]
    pub frames_limit: u32,
    #[serde(default = "default_tracked_vessel")]
    pub tracked_vessel: String,
    #[serde(default)]
    pub trail_mode: TrailMode,
    #[serde(with = "humantime_serde", default = "default_focus_settle_delay")]
    pub focus_settle_delay: Duration,
    #[serde(default = "default_fit_padding")]
    pub fit_padding: u32,
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_frames_limit() -> u32 {
    200
}

fn default_tracked_vessel() -> String {
    "Endurance".into()
}

fn default_focus_settle_delay() -> Duration {
    Duration::from_millis(300)
}

fn default_fit_padding() -> u32 {
    30
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        load_settings("FLEET_DASHBOARD")
    }

    pub fn reconciler(&self) -> ReconcilerSettings {
        ReconcilerSettings {
            tracked_vessel: VesselName::new(self.tracked_vessel.as_str()),
            trail_mode: self.trail_mode,
            padding: Padding::uniform(self.fit_padding),
        }
    }
}
