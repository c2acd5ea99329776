#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod routes;
pub mod settings;
pub mod startup;
pub mod upstream;

pub use error::{Error, Result};
