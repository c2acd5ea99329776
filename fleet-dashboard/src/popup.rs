use fleet_core::{Coordinates, PositionReport, format_local};

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Popup of a live vessel marker: name, local timestamp and coordinates to 5 decimals.
pub fn marker_popup(report: &PositionReport) -> String {
    format!(
        "<div style=\"font-size:0.85rem;\"><strong>{}</strong><br>{}<br>Lat : {:.5}<br>Lng : {:.5}</div>",
        escape_html(report.vessel_name.as_str()),
        escape_html(&format_local(report.observed_at.as_ref())),
        report.latitude,
        report.longitude,
    )
}

/// Popup of a trail point, `ordinal` is 1-based.
pub fn trail_popup(ordinal: usize, position: Coordinates) -> String {
    format!(
        "Point #{ordinal}<br>Lat: {:.5}<br>Lng: {:.5}",
        position.latitude, position.longitude
    )
}
