//! Canvas presets and the visible-tile record.

use crate::coord::{TileId, TILE_SIZE};
use std::fmt;

/// Fixed render-surface dimensions, chosen at viewport construction.
///
/// The canvas is not resizable at runtime; a viewport is built for one of
/// these presets and keeps it for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CanvasSize {
    /// 1280x768, a windowed desktop surface.
    #[default]
    Standard,
    /// 3840x2160, a full 4K frame.
    FourK,
}

impl CanvasSize {
    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            CanvasSize::Standard => 1280,
            CanvasSize::FourK => 3840,
        }
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            CanvasSize::Standard => 768,
            CanvasSize::FourK => 2160,
        }
    }

    /// Number of tile columns needed to span the width.
    pub fn tiles_horizontally(&self) -> u32 {
        self.width().div_ceil(TILE_SIZE)
    }

    /// Number of tile rows needed to span the height.
    pub fn tiles_vertically(&self) -> u32 {
        self.height().div_ceil(TILE_SIZE)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// A tile covering part of the canvas, with the screen position of its
/// top-left corner.
///
/// Offsets are fractional pixels and may fall outside [0, canvas) for
/// tiles clipped at the canvas edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub id: TileId,
    pub px: f64,
    pub py: f64,
}
