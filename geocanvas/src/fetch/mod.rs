//! Asynchronous tile fetching
//!
//! The queue and worker pool behind the tile cache. The queue collapses
//! duplicate requests while they are pending; the pool's threads block on
//! the queue and the network so the render path never has to.

mod pool;
mod queue;

pub use pool::{FetchError, FetchPool};
pub use queue::{FetchJob, FetchQueue};
