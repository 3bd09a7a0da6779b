//! The viewport state machine.
//!
//! A [`Projector`] is a window over the Web Mercator tile grid: a fractional
//! origin tile, a zoom level and a fixed canvas. Every mutation recomputes
//! the geographic bounds, so `bounds()` is never stale.

use super::types::{CanvasSize, VisibleTile};
use crate::coord::{
    clamp_zoom, geo_to_tile, tile_to_geo, tiles_per_axis, GeoPoint, TileId, MAX_ZOOM, MIN_ZOOM,
    TILE_SIZE,
};
use tracing::{debug, warn};

/// A pannable, zoomable viewport over the tile grid.
///
/// `origin_x`/`origin_y` are the fractional tile coordinates of the canvas's
/// top-left pixel at the current zoom. Screen coordinates are canvas-relative
/// pixels, x growing east and y growing south; a renderer that needs a
/// bottom-left origin flips y itself.
///
/// # Examples
///
/// ```
/// use geocanvas::coord::GeoPoint;
/// use geocanvas::viewport::{CanvasSize, Projector};
///
/// let city = GeoPoint::new(55.6761, 12.5683);
/// let mut view = Projector::new(city, 12, CanvasSize::Standard);
///
/// // The construction anchor sits at the canvas midpoint
/// let (px, py) = view.geo_to_screen(city);
/// assert!((px - 640.0).abs() < 1e-6);
/// assert!((py - 384.0).abs() < 1e-6);
///
/// view.zoom_in(640.0, 384.0);
/// assert_eq!(view.zoom(), 13);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    canvas: CanvasSize,
    zoom: u8,
    origin_x: f64,
    origin_y: f64,
    northwest: GeoPoint,
    southeast: GeoPoint,
}

impl Projector {
    /// Creates a viewport with `center` at the canvas midpoint.
    ///
    /// The zoom is clamped to the navigable range.
    pub fn new(center: GeoPoint, zoom: u8, canvas: CanvasSize) -> Self {
        let zoom = clamp_zoom(zoom);
        let tile = geo_to_tile(center, zoom);
        let origin_x = tile.x - f64::from(canvas.width()) / (2.0 * f64::from(TILE_SIZE));
        let origin_y = tile.y - f64::from(canvas.height()) / (2.0 * f64::from(TILE_SIZE));
        Self::from_origin(canvas, zoom, origin_x, origin_y)
    }

    /// Creates a viewport with `northwest` at the canvas's top-left corner.
    pub fn from_northwest(northwest: GeoPoint, zoom: u8, canvas: CanvasSize) -> Self {
        let zoom = clamp_zoom(zoom);
        let tile = geo_to_tile(northwest, zoom);
        Self::from_origin(canvas, zoom, tile.x, tile.y)
    }

    fn from_origin(canvas: CanvasSize, zoom: u8, origin_x: f64, origin_y: f64) -> Self {
        let mut projector = Self {
            canvas,
            zoom,
            origin_x,
            origin_y,
            northwest: GeoPoint::new(0.0, 0.0),
            southeast: GeoPoint::new(0.0, 0.0),
        };
        projector.update_bounds();
        projector
    }

    /// Shifts the view by a drag vector measured in tiles.
    ///
    /// `dx`/`dy` follow the canvas frame (x east, y south); the origin moves
    /// opposite the drag so the content follows the pointer. The position is
    /// not wrapped or clamped, so sustained panning can carry the derived
    /// longitude outside [-180, 180].
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.origin_x -= dx;
        self.origin_y -= dy;
        self.update_bounds();
    }

    /// Zooms one level in, keeping the point under the anchor pixel fixed.
    ///
    /// At the maximum zoom this is a no-op.
    pub fn zoom_in(&mut self, anchor_px: f64, anchor_py: f64) {
        let target = clamp_zoom(self.zoom.saturating_add(1));
        if target == self.zoom {
            return;
        }
        self.rezoom(anchor_px, anchor_py, target);
    }

    /// Zooms one level out, keeping the point under the anchor pixel fixed.
    ///
    /// At the minimum zoom this is a no-op.
    pub fn zoom_out(&mut self, anchor_px: f64, anchor_py: f64) {
        let target = clamp_zoom(self.zoom.saturating_sub(1));
        if target == self.zoom {
            return;
        }
        self.rezoom(anchor_px, anchor_py, target);
    }

    /// Moves to `new_zoom`, re-deriving the origin so the geographic point
    /// under the anchor pixel stays put.
    fn rezoom(&mut self, anchor_px: f64, anchor_py: f64, new_zoom: u8) {
        let anchor = self.screen_to_geo(anchor_px, anchor_py);
        let tile = geo_to_tile(anchor, new_zoom);
        self.zoom = new_zoom;
        self.origin_x = tile.x - anchor_px / f64::from(TILE_SIZE);
        self.origin_y = tile.y - anchor_py / f64::from(TILE_SIZE);
        self.update_bounds();
    }

    /// Repositions the view on the smallest rectangle covering `points`, at
    /// the highest zoom whose projection fits the canvas.
    ///
    /// Candidate zooms are tried from the maximum downward; the first whose
    /// projected width and height are both strictly inside the canvas wins,
    /// and the view is centered on the rectangle's tile-space midpoint. If no
    /// zoom fits, the minimum is used. A zero-extent rectangle (one point, or
    /// all points equal) fits everywhere and selects the maximum zoom. An
    /// empty slice leaves the viewport unchanged.
    pub fn fit(&mut self, points: &[GeoPoint]) {
        let Some(first) = points.first() else {
            warn!("fit called with no points, viewport unchanged");
            return;
        };

        let mut north = first.lat;
        let mut south = first.lat;
        let mut west = first.lon;
        let mut east = first.lon;
        for point in &points[1..] {
            north = north.max(point.lat);
            south = south.min(point.lat);
            west = west.min(point.lon);
            east = east.max(point.lon);
        }

        let top_left = GeoPoint::new(north, west);
        let bottom_right = GeoPoint::new(south, east);

        let mut selected = MIN_ZOOM;
        for zoom in (MIN_ZOOM..=MAX_ZOOM).rev() {
            let nw = geo_to_tile(top_left, zoom);
            let se = geo_to_tile(bottom_right, zoom);
            let width_px = (se.x - nw.x) * f64::from(TILE_SIZE);
            let height_px = (se.y - nw.y) * f64::from(TILE_SIZE);
            if width_px < f64::from(self.canvas.width()) && height_px < f64::from(self.canvas.height())
            {
                selected = zoom;
                break;
            }
        }

        let nw = geo_to_tile(top_left, selected);
        let se = geo_to_tile(bottom_right, selected);
        self.zoom = selected;
        self.origin_x =
            (nw.x + se.x) / 2.0 - f64::from(self.canvas.width()) / (2.0 * f64::from(TILE_SIZE));
        self.origin_y =
            (nw.y + se.y) / 2.0 - f64::from(self.canvas.height()) / (2.0 * f64::from(TILE_SIZE));
        self.update_bounds();

        debug!(points = points.len(), zoom = selected, "fitted viewport");
    }

    /// The geographic corners of the canvas, northwest then southeast.
    pub fn bounds(&self) -> (GeoPoint, GeoPoint) {
        (self.northwest, self.southeast)
    }

    /// Converts a geographic position to canvas-relative pixels.
    pub fn geo_to_screen(&self, point: GeoPoint) -> (f64, f64) {
        let tile = geo_to_tile(point, self.zoom);
        (
            (tile.x - self.origin_x) * f64::from(TILE_SIZE),
            (tile.y - self.origin_y) * f64::from(TILE_SIZE),
        )
    }

    /// Converts canvas-relative pixels to a geographic position.
    pub fn screen_to_geo(&self, px: f64, py: f64) -> GeoPoint {
        tile_to_geo(
            self.origin_x + px / f64::from(TILE_SIZE),
            self.origin_y + py / f64::from(TILE_SIZE),
            self.zoom,
        )
    }

    /// Enumerates the tiles covering the canvas with their screen offsets.
    ///
    /// Columns run from the origin's floor through `tiles_horizontally` past
    /// it, rows likewise, so partially visible edge tiles are included.
    /// Coordinates outside `[0, 2^zoom)` on either axis are skipped; near the
    /// map edges (or panned off the world) the result covers less than the
    /// canvas.
    pub fn visible_tiles(&self) -> Vec<VisibleTile> {
        let per_axis = i64::from(tiles_per_axis(self.zoom));
        let first_x = self.origin_x.floor() as i64;
        let first_y = self.origin_y.floor() as i64;
        let columns = i64::from(self.canvas.tiles_horizontally());
        let rows = i64::from(self.canvas.tiles_vertically());

        let mut tiles = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
        for x in first_x..=first_x + columns {
            if x < 0 || x >= per_axis {
                continue;
            }
            for y in first_y..=first_y + rows {
                if y < 0 || y >= per_axis {
                    continue;
                }
                tiles.push(VisibleTile {
                    id: TileId::new(self.zoom, x as u32, y as u32),
                    px: (x as f64 - self.origin_x) * f64::from(TILE_SIZE),
                    py: (y as f64 - self.origin_y) * f64::from(TILE_SIZE),
                });
            }
        }
        tiles
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The fractional tile coordinate of the canvas's top-left pixel.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    fn update_bounds(&mut self) {
        self.northwest = tile_to_geo(self.origin_x, self.origin_y, self.zoom);
        self.southeast = tile_to_geo(
            self.origin_x + f64::from(self.canvas.width()) / f64::from(TILE_SIZE),
            self.origin_y + f64::from(self.canvas.height()) / f64::from(TILE_SIZE),
            self.zoom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copenhagen() -> GeoPoint {
        GeoPoint::new(55.6761, 12.5683)
    }

    /// Danish bounding box corners, spanning lon 8.07..12.69, lat 54.56..57.75.
    fn denmark_corners() -> Vec<GeoPoint> {
        vec![GeoPoint::new(54.56, 8.07), GeoPoint::new(57.75, 12.69)]
    }

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "{} vs {} (tol {})", a, b, tol);
    }

    #[test]
    fn test_new_centers_the_anchor_point() {
        let view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let (px, py) = view.geo_to_screen(copenhagen());
        assert_close(px, 640.0, 1e-6);
        assert_close(py, 384.0, 1e-6);
        assert_eq!(view.zoom(), 12);
    }

    #[test]
    fn test_from_northwest_anchors_the_corner() {
        let nw = GeoPoint::new(58.813642, 5.625);
        let view = Projector::from_northwest(nw, 7, CanvasSize::Standard);
        let (bound_nw, bound_se) = view.bounds();
        assert_close(bound_nw.lat, nw.lat, 1e-6);
        assert_close(bound_nw.lon, nw.lon, 1e-6);
        assert!(bound_se.lat < bound_nw.lat);
        assert!(bound_se.lon > bound_nw.lon);
    }

    #[test]
    fn test_constructors_clamp_zoom() {
        let view = Projector::new(copenhagen(), 0, CanvasSize::Standard);
        assert_eq!(view.zoom(), MIN_ZOOM);
        let view = Projector::new(copenhagen(), 30, CanvasSize::Standard);
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_pan_moves_content_with_the_drag() {
        let mut view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let (before_px, before_py) = view.geo_to_screen(copenhagen());

        // Dragging half a tile east and a quarter tile south carries the
        // city the same distance across the screen
        view.pan(0.5, 0.25);
        let (after_px, after_py) = view.geo_to_screen(copenhagen());
        assert_close(after_px - before_px, 128.0, 1e-6);
        assert_close(after_py - before_py, 64.0, 1e-6);
    }

    #[test]
    fn test_repeated_pan_decreases_west_bound() {
        let mut view = Projector::new(GeoPoint::new(0.0, 0.0), 2, CanvasSize::Standard);
        let mut west = view.bounds().0.lon;
        for _ in 0..5 {
            view.pan(1.0, 0.0);
            let next = view.bounds().0.lon;
            assert!(next < west, "west bound should fall: {} -> {}", west, next);
            west = next;
        }
    }

    #[test]
    fn test_zoom_in_holds_anchor_fixed() {
        let mut view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let anchor = view.screen_to_geo(200.0, 300.0);

        view.zoom_in(200.0, 300.0);

        assert_eq!(view.zoom(), 13);
        let after = view.screen_to_geo(200.0, 300.0);
        assert_close(after.lat, anchor.lat, 1e-6);
        assert_close(after.lon, anchor.lon, 1e-6);
    }

    #[test]
    fn test_zoom_in_then_out_restores_view() {
        let mut view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let (origin_x, origin_y) = view.origin();

        view.zoom_in(640.0, 384.0);
        view.zoom_out(640.0, 384.0);

        assert_eq!(view.zoom(), 12);
        let (restored_x, restored_y) = view.origin();
        assert_close(restored_x, origin_x, 1e-6);
        assert_close(restored_y, origin_y, 1e-6);
    }

    #[test]
    fn test_zoom_at_limits_is_a_noop() {
        let mut view = Projector::new(copenhagen(), MAX_ZOOM, CanvasSize::Standard);
        let before = view.clone();
        view.zoom_in(100.0, 100.0);
        assert_eq!(view, before);

        let mut view = Projector::new(copenhagen(), MIN_ZOOM, CanvasSize::Standard);
        let before = view.clone();
        view.zoom_out(100.0, 100.0);
        assert_eq!(view, before);
    }

    #[test]
    fn test_fit_denmark_selects_zoom_7() {
        let mut view = Projector::new(GeoPoint::new(0.0, 0.0), 2, CanvasSize::Standard);
        view.fit(&denmark_corners());
        assert_eq!(view.zoom(), 7);

        // One level deeper the box no longer fits the canvas
        let nw = geo_to_tile(GeoPoint::new(57.75, 8.07), 8);
        let se = geo_to_tile(GeoPoint::new(54.56, 12.69), 8);
        let height_px = (se.y - nw.y) * f64::from(TILE_SIZE);
        assert!(height_px >= 768.0);
    }

    #[test]
    fn test_fit_single_point_selects_max_zoom() {
        let mut view = Projector::new(GeoPoint::new(0.0, 0.0), 2, CanvasSize::Standard);
        view.fit(&[copenhagen()]);
        assert_eq!(view.zoom(), MAX_ZOOM);

        // A zero-extent rectangle centers on the point itself
        let (px, py) = view.geo_to_screen(copenhagen());
        assert_close(px, 640.0, 1e-6);
        assert_close(py, 384.0, 1e-6);
    }

    #[test]
    fn test_fit_empty_slice_is_a_noop() {
        let mut view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let before = view.clone();
        view.fit(&[]);
        assert_eq!(view, before);
    }

    #[test]
    fn test_fit_centers_the_tile_midpoint() {
        let mut view = Projector::new(GeoPoint::new(0.0, 0.0), 2, CanvasSize::Standard);
        view.fit(&denmark_corners());

        let nw = geo_to_tile(GeoPoint::new(57.75, 8.07), view.zoom());
        let se = geo_to_tile(GeoPoint::new(54.56, 12.69), view.zoom());
        let midpoint = tile_to_geo((nw.x + se.x) / 2.0, (nw.y + se.y) / 2.0, view.zoom());

        let (px, py) = view.geo_to_screen(midpoint);
        assert_close(px, 640.0, 1e-6);
        assert_close(py, 384.0, 1e-6);
    }

    #[test]
    fn test_screen_geo_roundtrip() {
        let view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        for &(px, py) in &[(0.0, 0.0), (640.0, 384.0), (1279.0, 767.0)] {
            let geo = view.screen_to_geo(px, py);
            let (back_px, back_py) = view.geo_to_screen(geo);
            assert_close(back_px, px, 1e-6);
            assert_close(back_py, py, 1e-6);
        }
    }

    #[test]
    fn test_visible_tiles_cover_the_canvas() {
        let view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let tiles = view.visible_tiles();

        // 6 columns x 4 rows, all inside the zoom-12 grid
        assert_eq!(tiles.len(), 24);

        let min_px = tiles.iter().map(|t| t.px).fold(f64::INFINITY, f64::min);
        let max_px = tiles.iter().map(|t| t.px).fold(f64::NEG_INFINITY, f64::max);
        let min_py = tiles.iter().map(|t| t.py).fold(f64::INFINITY, f64::min);
        let max_py = tiles.iter().map(|t| t.py).fold(f64::NEG_INFINITY, f64::max);

        // First column/row is clipped at the edge, last reaches past it
        assert!(min_px <= 0.0 && min_px > -f64::from(TILE_SIZE));
        assert!(min_py <= 0.0 && min_py > -f64::from(TILE_SIZE));
        assert!(max_px + f64::from(TILE_SIZE) >= 1280.0);
        assert!(max_py + f64::from(TILE_SIZE) >= 768.0);
    }

    #[test]
    fn test_visible_tiles_skip_out_of_range_coordinates() {
        // The whole world at zoom 1 is a 2x2 grid; the canvas asks for more
        let view = Projector::from_northwest(GeoPoint::new(85.051129, -180.0), 1, CanvasSize::Standard);
        let tiles = view.visible_tiles();

        assert_eq!(tiles.len(), 4);
        for tile in &tiles {
            assert!(tile.id.x < 2);
            assert!(tile.id.y < 2);
            assert_eq!(tile.id.zoom, 1);
        }
    }

    #[test]
    fn test_visible_tiles_match_tile_ids_and_offsets() {
        let view = Projector::new(copenhagen(), 12, CanvasSize::Standard);
        let (origin_x, origin_y) = view.origin();

        for tile in view.visible_tiles() {
            assert_close(tile.px, (f64::from(tile.id.x) - origin_x) * 256.0, 1e-9);
            assert_close(tile.py, (f64::from(tile.id.y) - origin_y) * 256.0, 1e-9);
        }
    }
}
