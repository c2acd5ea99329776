mod account;
mod geo;
mod report;
mod timestamp;

pub use account::*;
pub use geo::*;
pub use report::*;
pub use timestamp::*;
