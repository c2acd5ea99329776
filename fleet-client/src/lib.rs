#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Typed client of the fleet proxy, shared by the dashboard and the gps forwarder.

mod client;

pub use client::FleetApiClient;
