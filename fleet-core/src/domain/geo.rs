use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Screen-space padding in pixels applied when fitting the viewport to a [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl Bounds {
    pub fn around(point: Coordinates) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        Some(iter.fold(Self::around(first), |mut bounds, p| {
            bounds.extend(p);
            bounds
        }))
    }

    pub fn extend(&mut self, point: Coordinates) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

impl Padding {
    pub const fn uniform(pixels: u32) -> Self {
        Self {
            x: pixels,
            y: pixels,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(30)
    }
}
