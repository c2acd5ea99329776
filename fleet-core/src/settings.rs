use config::{Config, ConfigError, File};
use serde::{Deserialize, de::DeserializeOwned};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, AsRefStr, Display)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Test,
    Local,
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<&LogLevel> for tracing::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, falling back to [`Environment::Local`] when unset or unknown.
    pub fn from_env() -> Environment {
        std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Environment::Local)
    }

    pub fn config_name(&self) -> String {
        self.as_ref().to_lowercase()
    }
}

/// Loads `config/<environment>.yml`, an optional `config/<environment>.secret.yml`, and
/// `<env_prefix>__*` environment variables on top.
pub fn load_settings<T: DeserializeOwned>(env_prefix: &str) -> Result<T, ConfigError> {
    let environment = Environment::from_env();
    let name = environment.config_name();

    Config::builder()
        .add_source(File::with_name(&format!("config/{name}")).required(true))
        .add_source(File::with_name(&format!("config/{name}.secret")).required(false))
        .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
        .set_override("environment", environment.as_ref())?
        .build()?
        .try_deserialize()
}
