use std::collections::HashMap;

use fleet_core::{Coordinates, NewFrame};

/// Converts an NMEA `ddmm.mmmm` (latitude) or `dddmm.mmmm` (longitude) field to decimal
/// degrees, negative for the southern and western hemispheres.
pub fn nmea_to_decimal(coordinate: &str, hemisphere: &str) -> Option<f64> {
    let hemisphere = hemisphere.trim().to_ascii_uppercase();
    let coordinate = coordinate.trim();
    if coordinate.is_empty() || hemisphere.is_empty() {
        return None;
    }

    let degree_len = match hemisphere.as_str() {
        "N" | "S" => 2,
        _ => 3,
    };

    let degrees: f64 = coordinate.get(..degree_len)?.parse().ok()?;
    let minutes: f64 = coordinate.get(degree_len..)?.parse().ok()?;
    let value = degrees + minutes / 60.0;

    Some(match hemisphere.as_str() {
        "S" | "W" => -value,
        _ => value,
    })
}

/// Position of a `GGA` or `RMC` sentence. Anything else, and `RMC` fixes flagged void,
/// yields `None`.
pub fn parse_sentence(sentence: &str) -> Option<Coordinates> {
    let sentence = sentence.trim();
    let fields: Vec<&str> = sentence.split(',').collect();

    let (lat, lat_hemi, lon, lon_hemi) =
        if sentence.starts_with("$GPGGA") || sentence.starts_with("$GNGGA") {
            if fields.len() < 6 {
                return None;
            }
            (fields[2], fields[3], fields[4], fields[5])
        } else if sentence.starts_with("$GPRMC") || sentence.starts_with("$GNRMC") {
            if fields.len() < 7 {
                return None;
            }
            let status = fields[2].trim();
            if !status.is_empty() && !status.eq_ignore_ascii_case("A") {
                return None;
            }
            (fields[3], fields[4], fields[5], fields[6])
        } else {
            return None;
        };

    Some(Coordinates::new(
        nmea_to_decimal(lat, lat_hemi)?,
        nmea_to_decimal(lon, lon_hemi)?,
    ))
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads `BOAT=..;LAT=..;LON=..;RAW=..` lines. Explicit coordinates win over a `RAW` sentence.
fn parse_key_values(line: &str, default_boat: &str) -> Option<NewFrame> {
    let fields: HashMap<String, &str> = line
        .split(';')
        .filter_map(|part| part.split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_uppercase(), v.trim()))
        .collect();

    let boat_name = fields
        .get("BOAT")
        .filter(|b| !b.is_empty())
        .copied()
        .unwrap_or(default_boat)
        .to_string();
    let raw = fields.get("RAW").copied().unwrap_or_default();

    if let (Some(lat), Some(lon)) = (fields.get("LAT"), fields.get("LON")) {
        return Some(NewFrame {
            boat_name,
            latitude: parse_number(lat)?,
            longitude: parse_number(lon)?,
            raw_frame: if raw.is_empty() { line } else { raw }.to_string(),
        });
    }

    if raw.starts_with('$') {
        let position = parse_sentence(raw)?;
        return Some(NewFrame {
            boat_name,
            latitude: position.latitude,
            longitude: position.longitude,
            raw_frame: raw.to_string(),
        });
    }

    None
}

/// Turns one line received from the GPS receiver into a frame ready to post, if it carries
/// a position.
pub fn parse_line(line: &str, default_boat: &str) -> Option<NewFrame> {
    let line = line.trim();
    let upper = line.to_ascii_uppercase();

    if ["BOAT=", "RAW=", "LAT="].iter().any(|k| upper.contains(k)) {
        if let Some(frame) = parse_key_values(line, default_boat) {
            return Some(frame);
        }
    }

    if line.starts_with('$') {
        let position = parse_sentence(line)?;
        return Some(NewFrame {
            boat_name: default_boat.to_string(),
            latitude: position.latitude,
            longitude: position.longitude,
            raw_frame: line.to_string(),
        });
    }

    None
}
