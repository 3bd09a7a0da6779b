//! Viewport over the Web Mercator tile grid.
//!
//! A [`Projector`] tracks where a fixed-size canvas sits on the world: an
//! origin tile, a zoom level and the derived geographic bounds. Input
//! handlers drive it with [`pan`](Projector::pan),
//! [`zoom_in`](Projector::zoom_in)/[`zoom_out`](Projector::zoom_out) and
//! [`fit`](Projector::fit); a renderer reads it back through
//! [`bounds`](Projector::bounds), the screen conversions and
//! [`visible_tiles`](Projector::visible_tiles).
//!
//! ```
//! use geocanvas::coord::GeoPoint;
//! use geocanvas::viewport::{CanvasSize, Projector};
//!
//! let mut view = Projector::new(GeoPoint::new(55.6761, 12.5683), 12, CanvasSize::Standard);
//! view.pan(0.5, 0.0);
//!
//! let (nw, se) = view.bounds();
//! assert!(nw.lon < se.lon);
//! assert!(!view.visible_tiles().is_empty());
//! ```

mod presets;
mod projector;
mod types;

pub use presets::Preset;
pub use projector::Projector;
pub use types::{CanvasSize, VisibleTile};
