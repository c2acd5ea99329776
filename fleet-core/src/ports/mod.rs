mod inbound;
mod map;
mod outbound;

pub use inbound::*;
pub use map::*;
pub use outbound::*;
