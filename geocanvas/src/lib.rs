//! geocanvas - slippy-map viewport engine and tile cache
//!
//! This library provides the tile-grid core of an interactive map renderer:
//! Web Mercator coordinate conversions, a pannable/zoomable viewport over a
//! fixed-size canvas, and a non-blocking tile cache that downloads map
//! imagery in the background and persists it on disk.
//!
//! # Typical use
//!
//! A render loop owns a [`viewport::Projector`] and a [`cache::TileCache`],
//! mutates the viewport from input events, and draws whatever tiles the
//! cache can already serve:
//!
//! ```
//! use geocanvas::coord::GeoPoint;
//! use geocanvas::provider::BuiltinProvider;
//! use geocanvas::viewport::{CanvasSize, Projector};
//!
//! let view = Projector::new(GeoPoint::new(55.6761, 12.5683), 12, CanvasSize::Standard);
//! let provider = BuiltinProvider::Watercolor;
//!
//! for tile in view.visible_tiles() {
//!     // One cache lookup per visible tile; absent tiles arrive later
//!     let _url = provider.tile_url(tile.id);
//! }
//! ```

pub mod cache;
pub mod coord;
pub mod fetch;
pub mod logging;
pub mod provider;
pub mod viewport;

/// Version of the geocanvas library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
