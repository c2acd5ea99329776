use crate::{Bounds, Coordinates, Padding};

/// Handle of a live marker owned by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Handle of a layer (point group or polyline) owned by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    pub position: Coordinates,
    pub popup: String,
    pub radius: u8,
}

/// Rendering target of the dashboard map.
///
/// Implementations only draw; all bookkeeping of which vessel owns which marker lives
/// with the caller.
pub trait MapSurface {
    fn add_marker(&mut self, position: Coordinates, popup: &str) -> MarkerId;
    /// Moves an existing marker and replaces its popup without re-creating it.
    fn update_marker(&mut self, marker: MarkerId, position: Coordinates, popup: &str);
    fn remove_marker(&mut self, marker: MarkerId);
    fn marker_position(&self, marker: MarkerId) -> Option<Coordinates>;
    fn open_popup(&mut self, marker: MarkerId);

    fn add_point_layer(&mut self, points: &[TrailPoint]) -> LayerId;
    fn add_polyline(&mut self, path: &[Coordinates]) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding);
    fn set_view(&mut self, center: Coordinates, zoom: u8);
    fn zoom(&self) -> u8;
    /// Re-measures the container, needed after it was hidden or resized.
    fn invalidate_size(&mut self);
}
