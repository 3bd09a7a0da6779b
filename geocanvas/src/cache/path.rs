//! Cache path construction.

use crate::coord::TileId;
use std::path::{Path, PathBuf};

/// Construct the on-disk path for a cached tile.
///
/// The layout is the persisted dedup ledger: a file existing at this path
/// means the tile has already been fetched.
///
/// ```text
/// <cache_root>/<namespace>/<zoom>/<x>/<y>.png
/// ```
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use geocanvas::cache::tile_path;
/// use geocanvas::coord::TileId;
///
/// let root = PathBuf::from("/cache");
/// let path = tile_path(&root, "watercolor", TileId::new(12, 2190, 1282));
///
/// assert_eq!(path, PathBuf::from("/cache/watercolor/12/2190/1282.png"));
/// ```
pub fn tile_path(cache_root: &Path, namespace: &str, tile: TileId) -> PathBuf {
    cache_root
        .join(namespace)
        .join(tile.zoom.to_string())
        .join(tile.x.to_string())
        .join(format!("{}.png", tile.y))
}
