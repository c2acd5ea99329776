#![deny(warnings)]
#![deny(rust_2018_idioms)]

use config::{Config, File};
use fleet_proxy::settings::Settings;

pub mod proxy;

#[test]
fn test_local_settings_are_valid() {
    Config::builder()
        .add_source(File::with_name("config/local.yml").required(true))
        .set_override("environment", "Local")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();
}

#[test]
fn test_development_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/development.yml").required(true))
        .set_override("environment", "Development")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert_eq!(settings.api.listener_address(), "0.0.0.0:33003");
    assert_eq!(settings.allowed_origins.len(), 4);
}
