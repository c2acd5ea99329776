use async_trait::async_trait;

use crate::{Boat, Frame, PositionReport, Result};

/// Read side of the fleet backend, polled by the dashboard.
#[async_trait]
pub trait FleetSource: Send + Sync {
    /// Latest position per vessel, at most one report per vessel name.
    async fn latest_boats(&self) -> Result<Vec<PositionReport>>;
    /// Most recent raw frames, possibly many per vessel and in any order.
    async fn frames(&self, limit: u32) -> Result<Vec<Frame>>;
    async fn boats(&self) -> Result<Vec<Boat>>;
}
