use async_trait::async_trait;

use crate::{NewBoat, NewFrame, Result};

/// Write side of the fleet backend, driven by dashboard forms and the gps forwarder.
#[async_trait]
pub trait FleetRegistry: Send + Sync {
    async fn add_frame(&self, frame: &NewFrame) -> Result<()>;
    async fn delete_frame(&self, id: i64) -> Result<()>;
    async fn add_boat(&self, boat: &NewBoat) -> Result<()>;
    async fn delete_boat(&self, id: &str) -> Result<()>;
}
