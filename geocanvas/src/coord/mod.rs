//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile coordinates as used by slippy-map tile servers.
//! The forward and inverse maps are exact algebraic inverses of each other
//! inside the Mercator latitude domain.

mod types;

pub use types::{
    GeoPoint, TileId, TilePoint, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM, TILE_SIZE,
};

use std::f64::consts::PI;

/// Clamps a latitude to the Web Mercator domain.
///
/// The projection diverges at the poles; every input latitude is pulled into
/// `[MIN_LAT, MAX_LAT]` before projecting so the conversions below are total
/// and never produce NaN or infinity.
#[inline]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(MIN_LAT, MAX_LAT)
}

/// Clamps a zoom level to the navigable range.
#[inline]
pub fn clamp_zoom(zoom: u8) -> u8 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Number of tiles along one axis of the world at a zoom level.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u32 {
    1u32 << zoom.min(MAX_ZOOM)
}

/// Converts a geographic position to fractional tile coordinates.
///
/// # Arguments
///
/// * `point` - Geographic position; latitude outside the Mercator domain is
///   clamped to ±85.05112878
/// * `zoom` - Zoom level
///
/// # Example
///
/// ```
/// use geocanvas::coord::{geo_to_tile, GeoPoint};
///
/// let tile = geo_to_tile(GeoPoint::new(0.0, 0.0), 2);
/// assert_eq!((tile.x, tile.y), (2.0, 2.0));
/// ```
#[inline]
pub fn geo_to_tile(point: GeoPoint, zoom: u8) -> TilePoint {
    let n = 2.0_f64.powi(zoom as i32);

    let x = (point.lon + 180.0) / 360.0 * n;

    // ln(tan φ + sec φ) written as asinh(tan φ)
    let lat_rad = clamp_lat(point.lat).to_radians();
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n;

    TilePoint { x, y }
}

/// Converts fractional tile coordinates back to a geographic position.
///
/// Inverse of [`geo_to_tile`]. The input is not range-checked; coordinates
/// outside `[0, 2^zoom]` extrapolate past the map edges, which is what the
/// viewport relies on when it is panned off the world.
#[inline]
pub fn tile_to_geo(x: f64, y: f64, zoom: u8) -> GeoPoint {
    let n = 2.0_f64.powi(zoom as i32);

    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();

    GeoPoint { lat, lon }
}
