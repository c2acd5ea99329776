#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod commands;
pub mod dashboard;
pub mod error;
pub mod memory_map;
pub mod popup;
pub mod reconciler;
pub mod settings;
pub mod startup;
pub mod tables;

pub use error::{Error, Result};
