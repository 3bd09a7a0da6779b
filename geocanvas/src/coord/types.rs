//! Coordinate type definitions

use std::fmt;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels the viewport will navigate between
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 24;

/// A geographic position in decimal degrees.
///
/// Plain value type; latitude is only clamped to the Mercator domain when a
/// point is projected, not on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A fractional position in tile space at some zoom level.
///
/// Produced by the forward projection during viewport math. `x` grows east
/// from the antimeridian, `y` grows south from the north Mercator edge; the
/// integral part names a tile, the fractional part a position inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePoint {
    pub x: f64,
    pub y: f64,
}

/// Integral tile coordinates in the Web Mercator / slippy map scheme.
///
/// Identifies one concrete 256×256 tile image. Valid coordinates lie in
/// `[0, 2^zoom)` on both axes; callers enumerate only in-range ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// X coordinate (east-west), 0 at the antimeridian
    pub x: u32,
    /// Y coordinate (north-south), 0 at the north edge
    pub y: u32,
    /// Zoom level
    pub zoom: u8,
}

impl TileId {
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { x, y, zoom }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}
