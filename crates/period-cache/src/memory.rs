//! In-memory cache implementation.

use moka::sync::Cache;
use period_core::{Period, PeriodCache, PeriodKey};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// Bounded in-memory period cache.
///
/// Entries expire after a period of no access and the least useful entries
/// are evicted once the capacity is reached. Backed by [`moka`], so it can be
/// shared between threads without external locking.
#[derive(Clone)]
pub struct InMemoryCache {
    periods: Cache<PeriodKey, Period>,
    max_capacity: u64,
    time_to_idle: Duration,
}

impl InMemoryCache {
    /// Default maximum number of entries.
    pub const DEFAULT_MAX_CAPACITY: u64 = 30_000;
    /// Default number of pre-allocated entries.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 10_000;
    /// Default idle time after which an entry expires.
    pub const DEFAULT_TIME_TO_IDLE: Duration = Duration::from_secs(12 * 60 * 60);

    /// Create a cache with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(
            Self::DEFAULT_MAX_CAPACITY,
            Self::DEFAULT_INITIAL_CAPACITY,
            Self::DEFAULT_TIME_TO_IDLE,
        )
    }

    /// Create a cache with explicit capacity and idle expiry.
    #[must_use]
    pub fn with_settings(max_capacity: u64, initial_capacity: usize, time_to_idle: Duration) -> Self {
        debug!(
            max_capacity,
            initial_capacity,
            time_to_idle_secs = time_to_idle.as_secs(),
            "Creating in-memory period cache"
        );
        let periods = Cache::builder()
            .max_capacity(max_capacity)
            .initial_capacity(initial_capacity)
            .time_to_idle(time_to_idle)
            .build();
        Self {
            periods,
            max_capacity,
            time_to_idle,
        }
    }

    /// Returns the configured maximum number of entries.
    #[must_use]
    pub const fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Returns the configured idle expiry.
    #[must_use]
    pub const fn time_to_idle(&self) -> Duration {
        self.time_to_idle
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entries", &self.periods.entry_count())
            .field("max_capacity", &self.max_capacity)
            .field("time_to_idle", &self.time_to_idle)
            .finish()
    }
}

impl PeriodCache for InMemoryCache {
    fn get(&self, key: &PeriodKey) -> Option<Period> {
        let period = self.periods.get(key);
        match &period {
            Some(_) => trace!(period_type = %key.period_type, calendar = key.calendar, "Cache hit"),
            None => trace!(period_type = %key.period_type, calendar = key.calendar, "Cache miss"),
        }
        period
    }

    fn insert(&self, key: PeriodKey, period: Period) {
        self.periods.insert(key, period);
    }

    fn invalidate_all(&self) {
        self.periods.invalidate_all();
        debug!("Invalidated all cached periods");
    }

    fn entry_count(&self) -> u64 {
        self.periods.run_pending_tasks();
        self.periods.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use period_core::{Iso8601Calendar, PeriodType};
    use std::sync::Arc;
    use std::thread;

    fn monthly(date: NaiveDate) -> (PeriodKey, Period) {
        let period = PeriodType::Monthly
            .create_period_for_date(date, &Iso8601Calendar::new())
            .unwrap();
        (PeriodKey::new("iso8601", PeriodType::Monthly, date), period)
    }

    #[test]
    fn test_memory_cache_get_and_insert() {
        let cache = InMemoryCache::new();
        let (key, period) = monthly(NaiveDate::from_ymd_opt(2023, 2, 10).unwrap());

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), period.clone());
        assert_eq!(cache.get(&key), Some(period));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_memory_cache_get_or_create() {
        let cache = InMemoryCache::new();
        let (key, period) = monthly(NaiveDate::from_ymd_opt(2023, 2, 10).unwrap());

        let mut calls = 0;
        let mut create = || -> period_core::Result<Period> {
            calls += 1;
            Ok(period.clone())
        };
        let first = cache.get_or_create(key.clone(), &mut create).unwrap();
        let second = cache.get_or_create(key, &mut create).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_memory_cache_errors_are_not_cached() {
        let cache = InMemoryCache::new();
        let (key, _) = monthly(NaiveDate::from_ymd_opt(2023, 2, 10).unwrap());

        let result = cache.get_or_create(key.clone(), &mut || -> period_core::Result<Period> {
            Err(period_core::PeriodError::Config("boom".to_string()))
        });
        assert!(result.is_err());
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_memory_cache_invalidate_all() {
        let cache = InMemoryCache::new();
        let (key, period) = monthly(NaiveDate::from_ymd_opt(2023, 2, 10).unwrap());
        cache.insert(key.clone(), period);

        cache.invalidate_all();
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_memory_cache_settings() {
        let cache = InMemoryCache::with_settings(10, 10, Duration::from_secs(60));
        assert_eq!(cache.max_capacity(), 10);
        assert_eq!(cache.time_to_idle(), Duration::from_secs(60));

        let defaults = InMemoryCache::default();
        assert_eq!(defaults.max_capacity(), 30_000);
        assert_eq!(defaults.time_to_idle(), Duration::from_secs(43_200));
    }

    #[test]
    fn test_memory_cache_is_shared_between_threads() {
        let cache = Arc::new(InMemoryCache::new());
        let handles: Vec<_> = (1..=8)
            .map(|day| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let (key, period) = monthly(NaiveDate::from_ymd_opt(2023, 3, day).unwrap());
                    let cached = cache
                        .get_or_create(key, &mut || -> period_core::Result<Period> {
                            Ok(period.clone())
                        })
                        .unwrap();
                    assert_eq!(cached, period);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.entry_count(), 8);
    }
}
