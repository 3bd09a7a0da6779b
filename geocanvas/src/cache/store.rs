//! The tile store: an in-memory map over disk files over the network.
//!
//! One `TileCache` serves one provider. Lookups are non-blocking: a miss
//! hands the download to the worker pool and reports the tile absent, so a
//! render loop polling `get` every frame stays responsive while tiles
//! trickle in.

use super::path::tile_path;
use super::types::{CacheConfig, CacheError};
use crate::coord::TileId;
use crate::fetch::{FetchJob, FetchPool, FetchQueue};
use crate::provider::{HttpClient, ReqwestClient, TileProvider};
use image::RgbaImage;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Lookup counters, maintained by the control thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub misses: u64,
}

/// Decoded-tile cache for a single provider.
///
/// Owns the in-memory map, the dedup queue and the download workers. The
/// map is only ever touched by the thread calling `get`, so lookups take
/// `&mut self` and need no lock; the queue is the one structure shared with
/// the workers.
///
/// In-memory entries are never evicted; the map grows for the life of the
/// cache. Dropping the cache (or calling [`shutdown`](TileCache::shutdown))
/// closes the queue and joins the workers.
pub struct TileCache {
    provider: TileProvider,
    config: CacheConfig,
    images: HashMap<TileId, Arc<RgbaImage>>,
    queue: Arc<FetchQueue>,
    pool: FetchPool,
    stats: CacheStats,
}

impl TileCache {
    /// Creates a cache downloading through the default HTTP client.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or a worker thread cannot
    /// be spawned.
    pub fn new(provider: TileProvider, config: CacheConfig) -> Result<Self, CacheError> {
        let client = ReqwestClient::with_timeout(config.timeout_secs)?;
        Self::with_client(provider, config, client)
    }

    /// Creates a cache with a caller-supplied HTTP client.
    pub fn with_client<C>(
        provider: TileProvider,
        config: CacheConfig,
        client: C,
    ) -> Result<Self, CacheError>
    where
        C: HttpClient + 'static,
    {
        let queue = Arc::new(FetchQueue::new());
        let pool = FetchPool::spawn(Arc::clone(&queue), client, config.workers.max(1))?;

        info!(
            provider = provider.namespace(),
            root = %config.cache_root.display(),
            workers = config.workers.max(1),
            offline = config.offline,
            "tile cache ready"
        );

        Ok(Self {
            provider,
            config,
            images: HashMap::new(),
            queue,
            pool,
            stats: CacheStats::default(),
        })
    }

    /// Looks up a tile without blocking.
    ///
    /// Resolution order: in-memory map, then the on-disk file (decoded and
    /// memoized), then `None` with a download enqueued. An undecodable disk
    /// file is deleted so the next lookup fetches a fresh copy. In offline
    /// mode a miss enqueues nothing.
    pub fn get(&mut self, tile: TileId) -> Option<Arc<RgbaImage>> {
        if let Some(image) = self.images.get(&tile) {
            self.stats.memory_hits += 1;
            return Some(Arc::clone(image));
        }

        let path = tile_path(&self.config.cache_root, self.provider.namespace(), tile);
        if path.is_file() {
            match load_tile(&path) {
                Ok(image) => {
                    self.stats.disk_hits += 1;
                    let image = Arc::new(image);
                    self.images.insert(tile, Arc::clone(&image));
                    return Some(image);
                }
                Err(e) => {
                    // Corrupt or truncated; delete so a later lookup
                    // re-downloads instead of failing forever
                    warn!(tile = %tile, path = %path.display(), error = %e, "deleting undecodable tile");
                    if let Err(e) = fs::remove_file(&path) {
                        warn!(path = %path.display(), error = %e, "failed to delete tile file");
                    }
                    self.stats.misses += 1;
                    return None;
                }
            }
        }

        self.stats.misses += 1;
        if !self.config.offline {
            let url = self.provider.tile_url(tile);
            self.queue.enqueue(FetchJob::new(url, path));
        }
        None
    }

    /// The provider this cache serves.
    pub fn provider(&self) -> &TileProvider {
        &self.provider
    }

    /// Root directory tiles are persisted under.
    pub fn cache_root(&self) -> &Path {
        &self.config.cache_root
    }

    pub fn is_offline(&self) -> bool {
        self.config.offline
    }

    /// Number of decoded tiles held in memory.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of downloads waiting in the queue.
    pub fn pending_fetches(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Stops accepting downloads and joins the worker pool.
    ///
    /// Jobs still queued are abandoned. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        self.pool.shutdown();
    }
}

/// Decodes one cached tile file.
fn load_tile(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}
