//! Worker threads and domain partitioning
//!
//! Each operation builds its own rayon pool and drops it when done; nothing
//! outlives the call.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::ops::Range;
use std::thread;

/// Three quarters of the available hardware threads, at least 1
pub fn default_worker_count() -> usize {
    let available = thread::available_parallelism().map_or(1, |n| n.get());
    (available * 3 / 4).max(1)
}

/// Build a pool with `workers` threads
pub fn build_pool(workers: usize) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("gen5seed-worker-{}", i))
        .build()
}

/// Split `0..len` into worker ranges and a remainder
///
/// Every worker gets `len / workers` contiguous values; the last
/// `len % workers` values form the remainder for the calling thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    pub workers: Vec<Range<u32>>,
    pub remainder: Range<u32>,
}

impl Partition {
    pub fn new(len: u32, workers: usize) -> Self {
        let workers = workers.max(1) as u32;
        let per_worker = len / workers;

        let ranges = if per_worker == 0 {
            Vec::new()
        } else {
            (0..workers)
                .map(|i| i * per_worker..(i + 1) * per_worker)
                .collect()
        };

        Self {
            workers: ranges,
            remainder: per_worker * workers..len,
        }
    }
}
