//! Download worker pool
//!
//! A fixed set of named threads consuming the fetch queue for the life of
//! the cache. Workers download tile bodies and persist them with a
//! write-to-temp-then-rename so a half-written file is never visible at the
//! final path. Failures are logged and dropped; the tile stays absent until
//! a later lookup re-enqueues it.

use super::queue::{FetchJob, FetchQueue};
use crate::provider::{HttpClient, ProviderError};
use std::fs;
use std::io;
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a single download-and-store step.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Download failed: {0}")]
    Http(#[from] ProviderError),
    #[error("Cache write failed: {0}")]
    Io(#[from] io::Error),
}

/// Fixed pool of download workers bound to one queue.
///
/// Workers run until the queue is closed. `shutdown` (also run on drop)
/// closes the queue and joins every worker; a worker mid-download finishes
/// its current job first, bounded by the HTTP client's timeout.
pub struct FetchPool {
    queue: Arc<FetchQueue>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl FetchPool {
    /// Spawns `workers` named threads consuming `queue`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a thread cannot be spawned.
    pub fn spawn<C>(queue: Arc<FetchQueue>, client: C, workers: usize) -> io::Result<Self>
    where
        C: HttpClient + 'static,
    {
        let client = Arc::new(client);
        let mut handles = Vec::with_capacity(workers);

        for i in 0..workers {
            let queue = Arc::clone(&queue);
            let client = Arc::clone(&client);

            let handle = thread::Builder::new()
                .name(format!("tile-fetch-{}", i))
                .spawn(move || worker_loop(&queue, client.as_ref()))?;
            handles.push(handle);
        }

        debug!(workers, "fetch pool started");
        Ok(Self { queue, handles })
    }

    /// Closes the queue and joins every worker.
    pub fn shutdown(&mut self) {
        self.queue.close();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for FetchPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<C: HttpClient>(queue: &FetchQueue, client: &C) {
    while let Some(job) = queue.take() {
        match fetch_and_store(client, &job) {
            Ok(bytes) => {
                debug!(url = %job.url, path = %job.dest.display(), bytes, "tile stored");
            }
            Err(e) => {
                // Dropped, not retried; a later cache lookup re-enqueues
                warn!(url = %job.url, error = %e, "tile download failed");
            }
        }
    }
}

/// Downloads one tile body and moves it into place.
fn fetch_and_store<C: HttpClient>(client: &C, job: &FetchJob) -> Result<usize, FetchError> {
    let body = client.get(&job.url)?;

    if let Some(parent) = job.dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = job.dest.with_extension("tmp");
    fs::write(&temp_path, &body)?;
    fs::rename(&temp_path, &job.dest)?;

    Ok(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;
    use std::path::Path;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        cond()
    }

    fn tile_dest(dir: &Path) -> std::path::PathBuf {
        dir.join("watercolor").join("3").join("4").join("5.png")
    }

    #[test]
    fn test_worker_downloads_and_stores() {
        let temp = TempDir::new().unwrap();
        let dest = tile_dest(temp.path());
        let queue = Arc::new(FetchQueue::new());
        let mock = MockHttpClient::new(Ok(b"tile-bytes".to_vec()));

        let _pool = FetchPool::spawn(Arc::clone(&queue), mock.clone(), 2).unwrap();
        assert!(queue.enqueue(FetchJob::new("https://tiles.test/3/4/5.png", &dest)));

        assert!(
            wait_until(Duration::from_secs(2), || dest.is_file()),
            "worker should have written the tile"
        );
        assert_eq!(fs::read(&dest).unwrap(), b"tile-bytes");
        assert!(
            !dest.with_extension("tmp").exists(),
            "temp file should have been renamed away"
        );
    }

    #[test]
    fn test_deduped_enqueues_download_once() {
        let temp = TempDir::new().unwrap();
        let dest = tile_dest(temp.path());
        let queue = Arc::new(FetchQueue::new());
        let mock = MockHttpClient::new(Ok(b"tile-bytes".to_vec()));

        // All duplicates land before any worker exists, so exactly one
        // survives dedup
        let make_job = || FetchJob::new("https://tiles.test/3/4/5.png", &dest);
        assert!(queue.enqueue(make_job()));
        assert!(!queue.enqueue(make_job()));
        assert!(!queue.enqueue(make_job()));

        let _pool = FetchPool::spawn(Arc::clone(&queue), mock.clone(), 2).unwrap();

        assert!(wait_until(Duration::from_secs(2), || dest.is_file()));
        // Settle so a hypothetical duplicate download would have started
        thread::sleep(Duration::from_millis(50));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_failed_download_is_dropped() {
        let temp = TempDir::new().unwrap();
        let dest = tile_dest(temp.path());
        let queue = Arc::new(FetchQueue::new());
        let mock = MockHttpClient::new(Err(ProviderError::HttpError("503".to_string())));

        let _pool = FetchPool::spawn(Arc::clone(&queue), mock.clone(), 1).unwrap();
        queue.enqueue(FetchJob::new("https://tiles.test/3/4/5.png", &dest));

        assert!(
            wait_until(Duration::from_secs(2), || mock.call_count() == 1),
            "worker should have attempted the download"
        );
        thread::sleep(Duration::from_millis(50));

        assert!(!dest.exists(), "failed download must not leave a file");
        assert!(queue.is_empty(), "failed job must not be requeued");
    }

    #[test]
    fn test_shutdown_joins_workers() {
        let queue = Arc::new(FetchQueue::new());
        let mock = MockHttpClient::new(Ok(Vec::new()));

        let pool = FetchPool::spawn(Arc::clone(&queue), mock, 3).unwrap();
        drop(pool);

        // Workers are gone and the queue refuses new work
        assert!(!queue.enqueue(FetchJob::new("https://tiles.test/x.png", "/tmp/x.png")));
    }
}
