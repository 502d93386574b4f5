//! Runtime search configuration

use crate::app::workers::default_worker_count;
use crate::constants::MAX_CANDIDATES;

/// Limits and parallelism of a `SeedSet`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Enumeration is abandoned once this many candidates are accepted
    pub max_candidates: usize,
    /// Worker threads per operation (at least 1)
    pub workers: usize,
}

impl SearchConfig {
    /// Override the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Override the candidate cap
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: MAX_CANDIDATES,
            workers: default_worker_count(),
        }
    }
}
