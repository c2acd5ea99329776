#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod forwarder;
pub mod nmea;
pub mod settings;
pub mod startup;

pub use error::{Error, Result};
