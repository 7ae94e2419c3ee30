//! Geographic primitives: waypoints and bounding regions.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees. Equality is value equality on
/// the raw components; waypoints carry no identity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    /// Create a waypoint from latitude/longitude degrees.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and within range.
    /// Invalid waypoints are ignored by edits and degrade camera
    /// operations; they never panic.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// Axis-aligned bounding region over waypoints, in degrees.
///
/// Folded min/max per component; does not wrap at the antimeridian, so
/// paths crossing ±180° over-frame rather than misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Bounds of a single point.
    #[inline]
    pub fn from_point(p: Waypoint) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// Minimal bounds covering every valid point in `points`.
    /// Returns `None` when no point is valid.
    pub fn from_points(points: &[Waypoint]) -> Option<Self> {
        let mut bounds: Option<GeoBounds> = None;
        for p in points.iter().filter(|p| p.is_valid()) {
            match bounds.as_mut() {
                Some(b) => b.extend(*p),
                None => bounds = Some(Self::from_point(*p)),
            }
        }
        bounds
    }

    /// Grow the bounds to include `p` (ignored when invalid).
    pub fn extend(&mut self, p: Waypoint) {
        if !p.is_valid() {
            return;
        }
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    /// True when the region has zero extent in both dimensions, i.e.
    /// every covered point coincides. Fitting such a region is
    /// meaningless and degrades to a pan.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.north == self.south && self.east == self.west
    }

    /// Midpoint of the region.
    #[inline]
    pub fn center(&self) -> Waypoint {
        Waypoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Whether `p` lies inside the region (inclusive).
    #[inline]
    pub fn contains(&self, p: Waypoint) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}
