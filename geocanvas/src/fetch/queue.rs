//! Deduplicating blocking work queue

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex};

/// A pending tile download: where to fetch from and where to land on disk.
///
/// Equality covers both fields; the queue's dedup set is keyed on the whole
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchJob {
    pub url: String,
    pub dest: PathBuf,
}

impl FetchJob {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
        }
    }
}

struct QueueState {
    pending: HashSet<FetchJob>,
    closed: bool,
}

/// Blocking work queue with set semantics.
///
/// Enqueuing a job equal to one already pending collapses into it, so a tile
/// requested on every frame while its download is in the queue is fetched
/// once. Dedup only covers jobs still *in* the queue: once a worker has taken
/// a job, an identical enqueue inserts a fresh one (the duplicate download is
/// harmless because workers write atomically).
///
/// `take` hands out pending jobs in no particular order.
pub struct FetchQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl FetchQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: HashSet::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Adds a job unless an equal one is already pending.
    ///
    /// Returns `true` if the job was inserted, `false` if it collapsed into
    /// a pending duplicate or the queue is closed.
    pub fn enqueue(&self, job: FetchJob) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return false;
        }

        let inserted = state.pending.insert(job);
        if inserted {
            self.available.notify_one();
        }
        inserted
    }

    /// Blocks until a job is available and removes it, or returns `None`
    /// once the queue has been closed.
    ///
    /// Closing wins over pending work: jobs still queued at close time are
    /// abandoned so workers can exit promptly.
    pub fn take(&self) -> Option<FetchJob> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.closed {
                return None;
            }
            if let Some(job) = state.pending.iter().next().cloned() {
                state.pending.remove(&job);
                return Some(job);
            }
            state = self.available.wait(state).unwrap();
        }
    }

    /// Closes the queue and wakes every blocked `take`.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.available.notify_all();
    }

    /// Number of jobs currently pending.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FetchQueue {
    fn default() -> Self {
        Self::new()
    }
}
