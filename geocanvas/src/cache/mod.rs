//! Persistent tile cache.
//!
//! Three layers resolve a [`TileId`](crate::coord::TileId) to pixels: an
//! in-memory map of decoded images, PNG files under the cache root, and
//! background download workers filling the gaps. [`TileCache::get`] never
//! blocks on the network; absent tiles come back `None` and show up on a
//! later call once a worker has stored them.
//!
//! Files are laid out as `{root}/{provider}/{zoom}/{x}/{y}.png` so several
//! providers can share one cache root without colliding.

mod path;
mod store;
mod types;

pub use path::tile_path;
pub use store::{CacheStats, TileCache};
pub use types::{CacheConfig, CacheError, DEFAULT_WORKERS};
