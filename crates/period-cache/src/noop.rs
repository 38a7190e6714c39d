//! No-op cache implementation.

use period_core::{Period, PeriodCache, PeriodKey};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always misses and `insert` discards the period, so every lookup
/// computes the period again. Useful for disabling caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PeriodCache for NoopCache {
    fn get(&self, _key: &PeriodKey) -> Option<Period> {
        trace!("NoopCache: get called, returning None");
        None
    }

    fn insert(&self, _key: PeriodKey, _period: Period) {
        trace!("NoopCache: insert called, doing nothing");
    }

    fn invalidate_all(&self) {
        trace!("NoopCache: invalidate_all called, doing nothing");
    }

    fn entry_count(&self) -> u64 {
        0
    }
}
