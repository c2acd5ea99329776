use fleet_client::FleetApiClient;
use fleet_core::{Credentials, FleetRegistry, NewFrame, Result, Session};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead};
use tracing::{debug, info, instrument, warn};

use crate::nmea::parse_line;

/// Longest line kept from the receiver. NMEA sentences stay well below this.
pub const MAX_LINE_LENGTH: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Nothing position-like in the line.
    Ignored,
    Sent(NewFrame),
    NotSent(NewFrame),
}

/// Posts positions read from the receiver to `/gps`, logging in again once when the token
/// is refused.
pub struct Forwarder {
    client: FleetApiClient,
    credentials: Credentials,
    default_boat: String,
}

impl Forwarder {
    pub fn new(client: FleetApiClient, credentials: Credentials, default_boat: String) -> Self {
        Self {
            client,
            credentials,
            default_boat,
        }
    }

    pub async fn login(&mut self) -> Result<Session> {
        let session = self.client.login(&self.credentials).await?;
        info!(username = %session.username, "logged in to fleet api");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn post(&mut self, frame: &NewFrame) -> Result<()> {
        match self.client.add_frame(frame).await {
            Err(e) if e.is_unauthorized() => {
                warn!("token refused, logging in again");
                self.login().await?;
                self.client.add_frame(frame).await
            }
            result => result,
        }
    }

    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let Some(frame) = parse_line(line, &self.default_boat) else {
            debug!(line, "ignored, no position found");
            return LineOutcome::Ignored;
        };

        match self.post(&frame).await {
            Ok(()) => {
                info!(
                    boat = %frame.boat_name,
                    "sent {:.6}, {:.6}",
                    frame.latitude,
                    frame.longitude
                );
                LineOutcome::Sent(frame)
            }
            Err(e) => {
                warn!("frame not sent: {e:?}");
                LineOutcome::NotSent(frame)
            }
        }
    }

    /// Forwards every line of `reader` until it reaches end of input or fails.
    ///
    /// Lines longer than [`MAX_LINE_LENGTH`] are dropped up to the next newline.
    pub async fn forward_lines(&mut self, reader: impl AsyncRead + Unpin) -> std::io::Result<()> {
        let codec =
            AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), MAX_LINE_LENGTH);
        let mut lines = FramedRead::new(reader, codec);
        // After a decode error the stream may yield one `None` before resuming.
        let mut resuming = false;

        loop {
            let chunk = match lines.next().await {
                Some(Ok(chunk)) => chunk,
                Some(Err(AnyDelimiterCodecError::MaxChunkLengthExceeded)) => {
                    warn!(max = MAX_LINE_LENGTH, "dropping oversized line");
                    resuming = true;
                    continue;
                }
                Some(Err(AnyDelimiterCodecError::Io(e))) => return Err(e),
                None if resuming => {
                    resuming = false;
                    continue;
                }
                None => return Ok(()),
            };
            resuming = false;

            let line = String::from_utf8_lossy(&chunk);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(line, "received");
            self.handle_line(line).await;
        }
    }
}
