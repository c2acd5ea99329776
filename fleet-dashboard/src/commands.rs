use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{error, instrument, warn};

use crate::{
    dashboard::{BoatForm, FrameForm, Trigger, TriggerSender},
    tables::FocusRequest,
};

const MAX_COMMAND_LENGTH: usize = 4096;

/// Parses one operator command.
///
/// Commands are a verb followed by `;`-separated arguments:
/// `add-frame Endurance;43.29;5.37;$GPGGA,...`, `delete-boat 12`, `focus Endurance`,
/// `focus Endurance;43.29;5.37`, `refresh`, `boats`, `tick`.
pub fn parse_command(line: &str) -> Option<Trigger> {
    let line = line.trim();
    let (verb, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut fields = args.split(';').map(str::trim);
    let mut next = || fields.next().unwrap_or_default().to_string();

    let trigger = match verb.to_ascii_lowercase().as_str() {
        "tick" => Trigger::Tick,
        "refresh" | "frames" => Trigger::RefreshFrames,
        "boats" => Trigger::RefreshBoats,
        "add-frame" => Trigger::AddFrame(FrameForm {
            boat_name: next(),
            latitude: next(),
            longitude: next(),
            raw_frame: next(),
        }),
        "delete-frame" => Trigger::DeleteFrame(args.trim().parse().ok()?),
        "add-boat" => Trigger::AddBoat(BoatForm {
            name: next(),
            boat_type: next(),
        }),
        "delete-boat" if !args.trim().is_empty() => Trigger::DeleteBoat(args.trim().to_string()),
        "focus" => {
            let vessel = next();
            let latitude = next().parse().unwrap_or(f64::NAN);
            let longitude = next().parse().unwrap_or(f64::NAN);
            Trigger::Focus(FocusRequest {
                vessel,
                latitude,
                longitude,
            })
        }
        _ => return None,
    };

    Some(trigger)
}

/// Forwards commands read line by line from `source` until it closes or the dashboard stops.
#[instrument(skip_all)]
pub async fn read_commands(source: impl AsyncRead + Unpin, sender: TriggerSender) {
    let codec = LinesCodec::new_with_max_length(MAX_COMMAND_LENGTH);
    let mut lines = FramedRead::new(source, codec);
    // After a decode error the stream may yield one `None` before resuming.
    let mut resuming = false;

    loop {
        let line = match lines.next().await {
            Some(Ok(line)) => line,
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                warn!(max = MAX_COMMAND_LENGTH, "dropping oversized command");
                resuming = true;
                continue;
            }
            Some(Err(LinesCodecError::Io(e))) => {
                error!("failed to read commands: {e:?}");
                break;
            }
            None if resuming => {
                resuming = false;
                continue;
            }
            None => break,
        };
        resuming = false;

        if line.trim().is_empty() {
            continue;
        }

        let Some(trigger) = parse_command(&line) else {
            warn!(%line, "unknown command");
            continue;
        };

        if sender.send(trigger).await.is_err() {
            break;
        }
    }
}
