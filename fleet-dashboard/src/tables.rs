use fleet_core::{
    Boat, Frame, MISSING_VALUE, NewBoat, NewFrame, Result, error::error::ValidationSnafu,
    format_local,
};

/// Longest raw frame shown in the frames table before it gets cut.
pub const RAW_PREVIEW_LEN: usize = 60;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TableState<R> {
    #[default]
    Loading,
    Empty,
    Rows(Vec<R>),
    /// Load failed, holds the text shown in place of the rows.
    Failed(String),
}

/// Where the map should go when a frame row is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    pub vessel: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub id: String,
    pub sequence_id: Option<i64>,
    pub vessel: String,
    pub observed: String,
    pub latitude: String,
    pub longitude: String,
    pub raw_preview: String,
    pub focus: FocusRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoatRow {
    pub id: String,
    pub name: String,
    pub boat_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl<R> TableState<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            TableState::Empty
        } else {
            TableState::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableState::Rows(rows) => rows,
            TableState::Loading | TableState::Empty | TableState::Failed(_) => &[],
        }
    }
}

impl From<&Frame> for FrameRow {
    fn from(frame: &Frame) -> Self {
        let vessel = frame.boat_name.clone().unwrap_or_default();
        FrameRow {
            id: frame
                .report
                .sequence_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            sequence_id: frame.report.sequence_id,
            vessel: if vessel.is_empty() {
                MISSING_VALUE.to_string()
            } else {
                vessel.clone()
            },
            observed: format_local(frame.report.observed_at.as_ref()),
            latitude: frame.latitude_text.clone(),
            longitude: frame.longitude_text.clone(),
            raw_preview: truncate(&frame.raw_frame, RAW_PREVIEW_LEN),
            focus: FocusRequest {
                vessel,
                latitude: frame.report.latitude,
                longitude: frame.report.longitude,
            },
        }
    }
}

impl From<&Boat> for BoatRow {
    fn from(boat: &Boat) -> Self {
        BoatRow {
            id: boat.id_text(),
            name: boat.name.clone(),
            boat_type: boat
                .boat_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        }
    }
}

/// Cuts `value` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &value[..idx]),
        None => value.to_string(),
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn validate_new_frame(
    boat_name: &str,
    latitude: &str,
    longitude: &str,
    raw_frame: &str,
) -> Result<NewFrame> {
    let boat_name = boat_name.trim();
    if boat_name.is_empty() {
        return ValidationSnafu {
            message: "Vessel name is required",
        }
        .fail();
    }

    let (Some(latitude), Some(longitude)) = (parse_coordinate(latitude), parse_coordinate(longitude))
    else {
        return ValidationSnafu {
            message: "Latitude and longitude must be valid numbers",
        }
        .fail();
    };

    Ok(NewFrame {
        boat_name: boat_name.to_string(),
        latitude,
        longitude,
        raw_frame: raw_frame.trim().to_string(),
    })
}

pub fn validate_new_boat(name: &str, boat_type: &str) -> Result<NewBoat> {
    let name = name.trim();
    if name.is_empty() {
        return ValidationSnafu {
            message: "Boat name is required",
        }
        .fail();
    }

    Ok(NewBoat {
        name: name.to_string(),
        boat_type: boat_type.trim().to_string(),
    })
}
