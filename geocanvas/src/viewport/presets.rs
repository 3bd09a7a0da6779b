//! Named starting views.
//!
//! Each preset resolves to a [`Projector`] via
//! [`Projector::from_northwest`], with corner coordinates and zoom tuned
//! per canvas size so both canvases frame roughly the same area.

use super::projector::Projector;
use super::types::CanvasSize;
use crate::coord::GeoPoint;
use std::fmt;

/// A named starting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// The whole world.
    World,
    /// Denmark.
    Denmark,
    /// The greater Copenhagen area.
    CopenhagenArea,
    /// Central Copenhagen.
    CityCenter,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::World => "world",
            Preset::Denmark => "denmark",
            Preset::CopenhagenArea => "copenhagen-area",
            Preset::CityCenter => "city-center",
        }
    }

    /// Builds the viewport for this preset on the given canvas.
    pub fn projector(&self, canvas: CanvasSize) -> Projector {
        let (lat, lon, zoom) = match (self, canvas) {
            (Preset::World, CanvasSize::Standard) => (85.051129, -180.0, 2),
            (Preset::World, CanvasSize::FourK) => (74.019543, -157.5, 4),
            (Preset::Denmark, CanvasSize::Standard) => (58.813642, 5.625, 7),
            (Preset::Denmark, CanvasSize::FourK) => (57.704047, 4.921875, 9),
            (Preset::CopenhagenArea, CanvasSize::Standard) => (55.875211, 11.953125, 11),
            (Preset::CopenhagenArea, CanvasSize::FourK) => (55.825873, 12.041050, 13),
            (Preset::CityCenter, CanvasSize::Standard) => (55.684972, 12.56387, 15),
            (Preset::CityCenter, CanvasSize::FourK) => (55.692068, 12.518921, 16),
        };
        Projector::from_northwest(GeoPoint::new(lat, lon), zoom, canvas)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_spans_the_antimeridian() {
        let view = Preset::World.projector(CanvasSize::Standard);
        assert_eq!(view.zoom(), 2);
        let (nw, _) = view.bounds();
        assert!((nw.lon - -180.0).abs() < 1e-6);
        assert!(nw.lat > 85.0);
    }

    #[test]
    fn test_denmark_contains_copenhagen() {
        let view = Preset::Denmark.projector(CanvasSize::Standard);
        assert_eq!(view.zoom(), 7);

        let (nw, se) = view.bounds();
        let city = GeoPoint::new(55.6761, 12.5683);
        assert!(se.lat < city.lat && city.lat < nw.lat);
        assert!(nw.lon < city.lon && city.lon < se.lon);
    }

    #[test]
    fn test_fourk_presets_zoom_deeper() {
        for preset in [
            Preset::World,
            Preset::Denmark,
            Preset::CopenhagenArea,
            Preset::CityCenter,
        ] {
            let standard = preset.projector(CanvasSize::Standard);
            let fourk = preset.projector(CanvasSize::FourK);
            assert!(fourk.zoom() > standard.zoom(), "{}", preset);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Preset::World.name(), "world");
        assert_eq!(format!("{}", Preset::CopenhagenArea), "copenhagen-area");
    }
}
