use std::collections::{HashMap, HashSet};

use fleet_core::{
    Bounds, Coordinates, LayerId, MapSurface, MarkerId, Padding, PositionReport, TrailPoint,
    VesselName,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::popup::{marker_popup, trail_popup};

pub const TRAIL_POINT_RADIUS: u8 = 4;
pub const TRAIL_HEAD_RADIUS: u8 = 7;
pub const FOCUS_ZOOM: u8 = 6;

/// Which frames feed the trail overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TrailMode {
    /// Only frames of the tracked vessel.
    #[default]
    TrackedVessel,
    /// Every frame of the snapshot, all vessels joined into one line.
    AllFrames,
}

#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    pub tracked_vessel: VesselName,
    pub trail_mode: TrailMode,
    pub padding: Padding,
}

/// The two layers making up the trail of the tracked vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailOverlay {
    pub points: LayerId,
    pub line: LayerId,
    pub len: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LatestPass {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailPass {
    /// Nothing drawable in the snapshot, the previous overlay is left as is.
    Kept,
    Rebuilt { points: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusOutcome {
    Marker(Coordinates),
    Fallback(Coordinates),
    Nothing,
}

/// Keeps one marker per vessel and the trail overlay in sync with polled snapshots.
///
/// The reconciler is the only owner of its marker set and overlay; every change to the map
/// goes through it.
pub struct MapReconciler<M> {
    map: M,
    markers: HashMap<VesselName, MarkerId>,
    trail: Option<TrailOverlay>,
    settings: ReconcilerSettings,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            tracked_vessel: VesselName::new("Endurance"),
            trail_mode: TrailMode::default(),
            padding: Padding::default(),
        }
    }
}

impl<M: MapSurface> MapReconciler<M> {
    pub fn new(map: M, settings: ReconcilerSettings) -> Self {
        Self {
            map,
            markers: HashMap::new(),
            trail: None,
            settings,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn marker(&self, vessel: &str) -> Option<MarkerId> {
        self.markers.get(vessel).copied()
    }

    pub fn vessels(&self) -> HashSet<&VesselName> {
        self.markers.keys().collect()
    }

    pub fn trail(&self) -> Option<TrailOverlay> {
        self.trail
    }

    /// Syncs the marker set with a latest-position-per-vessel snapshot.
    #[instrument(skip_all, fields(app.reports = snapshot.len()))]
    pub fn reconcile_latest(&mut self, snapshot: &[PositionReport]) -> LatestPass {
        let mut pass = LatestPass::default();

        let present: HashSet<&VesselName> = snapshot.iter().map(|r| &r.vessel_name).collect();
        let stale: Vec<VesselName> = self
            .markers
            .keys()
            .filter(|name| !present.contains(name))
            .cloned()
            .collect();

        for name in stale {
            if let Some(marker) = self.markers.remove(&name) {
                self.map.remove_marker(marker);
                pass.removed += 1;
            }
        }

        let mut bounds: Option<Bounds> = None;

        for report in snapshot {
            let Some(position) = report.valid_coordinates() else {
                warn!(
                    vessel = %report.vessel_name,
                    latitude = report.latitude,
                    longitude = report.longitude,
                    "skipping report with non-finite coordinates"
                );
                pass.skipped += 1;
                continue;
            };

            let popup = marker_popup(report);

            match self.markers.get(&report.vessel_name) {
                Some(&marker) => {
                    self.map.update_marker(marker, position, &popup);
                    pass.updated += 1;
                }
                None => {
                    let marker = self.map.add_marker(position, &popup);
                    self.markers.insert(report.vessel_name.clone(), marker);
                    pass.added += 1;
                }
            }

            match bounds.as_mut() {
                Some(b) => b.extend(position),
                None => bounds = Some(Bounds::around(position)),
            }
        }

        if let Some(bounds) = bounds {
            self.map.fit_bounds(bounds, self.settings.padding);
        }

        debug!(?pass, "latest positions reconciled");
        pass
    }

    /// Rebuilds the trail overlay from a frames snapshot.
    #[instrument(skip_all, fields(app.frames = snapshot.len()))]
    pub fn reconcile_trail<R: AsRef<PositionReport>>(&mut self, snapshot: &[R]) -> TrailPass {
        let mut chosen: Vec<&PositionReport> = match self.settings.trail_mode {
            TrailMode::TrackedVessel => snapshot
                .iter()
                .map(<R as AsRef<PositionReport>>::as_ref)
                .filter(|r| {
                    r.vessel_name
                        .eq_ignore_case(self.settings.tracked_vessel.as_str())
                })
                .collect(),
            TrailMode::AllFrames => snapshot
                .iter()
                .map(<R as AsRef<PositionReport>>::as_ref)
                .collect(),
        };

        // Stable: equal or missing ids keep their snapshot order.
        chosen.sort_by_key(|r| r.sequence_id.unwrap_or(0));

        let path: Vec<Coordinates> = chosen
            .iter()
            .filter_map(|r| r.valid_coordinates())
            .collect();

        if path.is_empty() {
            debug!("no drawable trail points, keeping previous trail");
            return TrailPass::Kept;
        }

        if let Some(old) = self.trail.take() {
            self.map.remove_layer(old.points);
            self.map.remove_layer(old.line);
        }

        let last = path.len() - 1;
        let points: Vec<TrailPoint> = path
            .iter()
            .enumerate()
            .map(|(idx, &position)| TrailPoint {
                position,
                popup: trail_popup(idx + 1, position),
                radius: if idx == last {
                    TRAIL_HEAD_RADIUS
                } else {
                    TRAIL_POINT_RADIUS
                },
            })
            .collect();

        let overlay = TrailOverlay {
            points: self.map.add_point_layer(&points),
            line: self.map.add_polyline(&path),
            len: path.len(),
        };
        self.trail = Some(overlay);

        if let Some(bounds) = Bounds::from_points(path.iter().copied()) {
            self.map.fit_bounds(bounds, self.settings.padding);
        }

        TrailPass::Rebuilt { points: path.len() }
    }

    /// Centers the map on the live marker of `vessel`, or on the fallback position.
    ///
    /// This is the part of focusing that runs after the latest snapshot was refreshed and the
    /// map had time to settle.
    pub fn focus(&mut self, vessel: &str, fallback_lat: f64, fallback_lon: f64) -> FocusOutcome {
        self.map.invalidate_size();

        let live = (!vessel.is_empty())
            .then(|| self.marker(vessel))
            .flatten()
            .and_then(|m| Some((m, self.map.marker_position(m)?)));

        if let Some((marker, position)) = live {
            let zoom = self.map.zoom().max(FOCUS_ZOOM);
            self.map.set_view(position, zoom);
            self.map.open_popup(marker);
            return FocusOutcome::Marker(position);
        }

        let fallback = Coordinates::new(fallback_lat, fallback_lon);
        if fallback.is_finite() {
            self.map.set_view(fallback, FOCUS_ZOOM);
            return FocusOutcome::Fallback(fallback);
        }

        debug!(vessel, "nothing to focus on");
        FocusOutcome::Nothing
    }
}
