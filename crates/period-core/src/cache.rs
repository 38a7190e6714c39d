//! Cache trait for memoizing period creation.
//!
//! Creating a period from a date is pure, so results can be shared freely.
//! This module defines the [`PeriodCache`] trait and the [`PeriodKey`] it is
//! indexed by; implementations live in the `period-cache` crate.

use chrono::{NaiveDate, NaiveTime};

use crate::error::Result;
use crate::period::Period;
use crate::period_type::PeriodType;

/// Identity of a cached period: calendar, period type and the input date.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    /// Calendar name, e.g. `iso8601`.
    pub calendar: &'static str,
    /// The period type.
    pub period_type: PeriodType,
    /// Input date as milliseconds since the Unix epoch, midnight UTC.
    pub epoch_millis: i64,
}

impl PeriodKey {
    /// Builds the key for creating a `period_type` period from `date` in `calendar`.
    #[must_use]
    pub fn new(calendar: &'static str, period_type: PeriodType, date: NaiveDate) -> Self {
        Self {
            calendar,
            period_type,
            epoch_millis: date.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
        }
    }
}

/// Trait for caching created periods.
///
/// Implementations must be safe to share between threads. A cache may drop
/// entries at any time; a miss only means the period is computed again.
pub trait PeriodCache: Send + Sync {
    /// Returns the cached period for the key, if present.
    fn get(&self, key: &PeriodKey) -> Option<Period>;

    /// Stores a period under the key.
    fn insert(&self, key: PeriodKey, period: Period);

    /// Returns the cached period or computes, stores and returns it.
    ///
    /// Errors from `create` are returned as is and nothing is stored.
    fn get_or_create(
        &self,
        key: PeriodKey,
        create: &mut dyn FnMut() -> Result<Period>,
    ) -> Result<Period> {
        if let Some(period) = self.get(&key) {
            return Ok(period);
        }
        let period = create()?;
        self.insert(key, period.clone());
        Ok(period)
    }

    /// Removes all entries.
    fn invalidate_all(&self);

    /// Approximate number of cached entries.
    fn entry_count(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        let key = PeriodKey::new("iso8601", PeriodType::Monthly, date);
        assert_eq!(key.epoch_millis, 86_400_000);
    }

    #[test]
    fn test_keys_differ_by_calendar_and_type() {
        let date = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
        let monthly = PeriodKey::new("iso8601", PeriodType::Monthly, date);
        assert_ne!(monthly, PeriodKey::new("persian", PeriodType::Monthly, date));
        assert_ne!(monthly, PeriodKey::new("iso8601", PeriodType::Quarterly, date));
        assert_eq!(monthly, PeriodKey::new("iso8601", PeriodType::Monthly, date));
    }
}
