#![deny(warnings)]
#![deny(rust_2018_idioms)]

use config::{Config, File};
use gps_forwarder::settings::Settings;

pub mod forwarder;

#[test]
fn test_local_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/local.yml").required(true))
        .set_override("environment", "Local")
        .unwrap()
        .set_override("credentials.username", "test")
        .unwrap()
        .set_override("credentials.password", "test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert_eq!(settings.baud_rate, 9600);
    assert_eq!(settings.reconnect_delay, std::time::Duration::from_secs(5));
}

#[test]
fn test_development_settings_are_valid() {
    Config::builder()
        .add_source(File::with_name("config/development.yml").required(true))
        .set_override("environment", "Development")
        .unwrap()
        .set_override("credentials.username", "test")
        .unwrap()
        .set_override("credentials.password", "test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();
}
