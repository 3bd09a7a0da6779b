//! Cache configuration and errors.

use crate::provider::{ProviderError, DEFAULT_TIMEOUT_SECS};
use std::path::PathBuf;
use thiserror::Error;

/// Number of download workers the original always ran; still a good default
/// for tile servers that frown on aggressive parallelism.
pub const DEFAULT_WORKERS: usize = 4;

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache or worker pool setup
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Tile cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory root; tiles land under `{root}/{namespace}/...`
    pub cache_root: PathBuf,
    /// Number of download worker threads (minimum 1)
    pub workers: usize,
    /// Download timeout in seconds
    pub timeout_secs: u64,
    /// Serve memory and disk hits only; never touch the network
    pub offline: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let cache_root = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geocanvas");

        Self {
            cache_root,
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache directory root.
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = root.into();
        self
    }

    /// Set the number of download workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the download timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Toggle offline mode.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}
