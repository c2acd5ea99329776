#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Shared domain types and ports for the fleet tracker: position reports, map geometry,
//! the map surface the dashboard renders onto, and the backend the dashboard reads from.

mod domain;
pub mod error;
mod ports;
mod settings;
mod telemetry;

pub use domain::*;
pub use error::{Error, Result};
pub use ports::*;
pub use settings::*;
pub use telemetry::*;
