use std::collections::BTreeMap;

use fleet_core::{Bounds, Coordinates, LayerId, MapSurface, MarkerId, Padding, TrailPoint};

pub static DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 46.8,
    longitude: 2.0,
};
pub const DEFAULT_ZOOM: u8 = 5;
pub const MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarker {
    pub position: Coordinates,
    pub popup: String,
    pub popup_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedLayer {
    Points(Vec<TrailPoint>),
    Polyline(Vec<Coordinates>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Headless [`MapSurface`] that keeps the rendered state in memory.
///
/// Used by the dashboard service when no browser is attached, and by tests to inspect what
/// the reconciler drew.
#[derive(Debug)]
pub struct InMemoryMap {
    next_id: u64,
    markers: BTreeMap<MarkerId, RenderedMarker>,
    layers: BTreeMap<LayerId, RenderedLayer>,
    viewport: Viewport,
    last_fit: Option<(Bounds, Padding)>,
    markers_created: usize,
    size_invalidations: usize,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            markers: BTreeMap::new(),
            layers: BTreeMap::new(),
            viewport: Viewport {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
            last_fit: None,
            markers_created: 0,
            size_invalidations: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn marker(&self, marker: MarkerId) -> Option<&RenderedMarker> {
        self.markers.get(&marker)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&MarkerId, &RenderedMarker)> {
        self.markers.iter()
    }

    pub fn layer(&self, layer: LayerId) -> Option<&RenderedLayer> {
        self.layers.get(&layer)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn last_fit(&self) -> Option<(Bounds, Padding)> {
        self.last_fit
    }

    /// Total number of markers ever attached, moved markers are not counted again.
    pub fn markers_created(&self) -> usize {
        self.markers_created
    }

    pub fn size_invalidations(&self) -> usize {
        self.size_invalidations
    }
}

/// Largest zoom level at which the whole box still fits a world-sized tile pyramid.
fn zoom_for(bounds: &Bounds) -> u8 {
    let span = (bounds.north - bounds.south).max(bounds.east - bounds.west);
    if span <= f64::EPSILON {
        return MAX_ZOOM;
    }
    (360.0 / span).log2().floor().clamp(0.0, MAX_ZOOM as f64) as u8
}

impl MapSurface for InMemoryMap {
    fn add_marker(&mut self, position: Coordinates, popup: &str) -> MarkerId {
        let id = MarkerId(self.next_id());
        self.markers.insert(
            id,
            RenderedMarker {
                position,
                popup: popup.to_string(),
                popup_open: false,
            },
        );
        self.markers_created += 1;
        id
    }

    fn update_marker(&mut self, marker: MarkerId, position: Coordinates, popup: &str) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.position = position;
            m.popup = popup.to_string();
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn marker_position(&self, marker: MarkerId) -> Option<Coordinates> {
        self.markers.get(&marker).map(|m| m.position)
    }

    fn open_popup(&mut self, marker: MarkerId) {
        for (id, m) in self.markers.iter_mut() {
            m.popup_open = *id == marker;
        }
    }

    fn add_point_layer(&mut self, points: &[TrailPoint]) -> LayerId {
        let id = LayerId(self.next_id());
        self.layers.insert(id, RenderedLayer::Points(points.to_vec()));
        id
    }

    fn add_polyline(&mut self, path: &[Coordinates]) -> LayerId {
        let id = LayerId(self.next_id());
        self.layers.insert(id, RenderedLayer::Polyline(path.to_vec()));
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        self.viewport = Viewport {
            center: bounds.center(),
            zoom: zoom_for(&bounds),
        };
        self.last_fit = Some((bounds, padding));
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.viewport = Viewport {
            center,
            zoom: zoom.min(MAX_ZOOM),
        };
    }

    fn zoom(&self) -> u8 {
        self.viewport.zoom
    }

    fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
    }
}

impl Default for InMemoryMap {
    fn default() -> Self {
        Self::new()
    }
}
