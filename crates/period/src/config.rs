//! Configuration of a [`PeriodContext`](crate::PeriodContext).
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use period_cache::{InMemoryCache, NoopCache};
use period_core::{Calendar, Iso8601Calendar, PeriodCache, PeriodError, PersianCalendar, Result};

use crate::relative::FinancialYearStart;

/// Supported calendar systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    /// ISO-8601 (Gregorian) calendar.
    #[default]
    Iso8601,
    /// Persian (Solar Hijri) calendar.
    Persian,
}

impl CalendarKind {
    /// Returns a shared instance of the calendar.
    #[must_use]
    pub fn calendar(self) -> Arc<dyn Calendar> {
        match self {
            Self::Iso8601 => Arc::new(Iso8601Calendar::new()),
            Self::Persian => Arc::new(PersianCalendar::new()),
        }
    }
}

/// Settings of the period cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether created periods are cached at all.
    pub enabled: bool,
    /// Maximum number of cached periods.
    pub max_capacity: u64,
    /// Number of entries allocated up front.
    pub initial_capacity: usize,
    /// Seconds after the last access at which an entry expires.
    pub time_to_idle_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: InMemoryCache::DEFAULT_MAX_CAPACITY,
            initial_capacity: InMemoryCache::DEFAULT_INITIAL_CAPACITY,
            time_to_idle_secs: InMemoryCache::DEFAULT_TIME_TO_IDLE.as_secs(),
        }
    }
}

impl CacheConfig {
    /// Builds the cache described by these settings.
    #[must_use]
    pub fn build(&self) -> Arc<dyn PeriodCache> {
        if self.enabled {
            Arc::new(InMemoryCache::with_settings(
                self.max_capacity,
                self.initial_capacity,
                Duration::from_secs(self.time_to_idle_secs),
            ))
        } else {
            Arc::new(NoopCache::new())
        }
    }
}

/// Configuration of a period context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Calendar all periods are aligned to.
    pub calendar: CalendarKind,
    /// Cache settings.
    pub cache: CacheConfig,
    /// Financial year used by the financial relative periods.
    pub financial_year_start: FinancialYearStart,
    /// Whether rolling relative periods end with the period containing the
    /// reference date. When false they end with the period before it.
    pub rolling_includes_current: bool,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarKind::default(),
            cache: CacheConfig::default(),
            financial_year_start: FinancialYearStart::default(),
            rolling_includes_current: true,
        }
    }
}

impl PeriodConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PeriodError::Config(format!("Invalid configuration: {e}")))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PeriodError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PeriodConfig::default();
        assert_eq!(config.calendar, CalendarKind::Iso8601);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_capacity, 30_000);
        assert_eq!(config.cache.initial_capacity, 10_000);
        assert_eq!(config.cache.time_to_idle_secs, 43_200);
        assert_eq!(config.financial_year_start, FinancialYearStart::October);
        assert!(config.rolling_includes_current);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(PeriodConfig::from_json_str("{}").unwrap(), PeriodConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = PeriodConfig::from_json_str(
            r#"{
                "calendar": "persian",
                "cache": { "enabled": false },
                "financial_year_start": "april",
                "rolling_includes_current": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.calendar, CalendarKind::Persian);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_capacity, 30_000);
        assert_eq!(config.financial_year_start, FinancialYearStart::April);
        assert!(!config.rolling_includes_current);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PeriodConfig::from_json_str(r#"{ "calendar": "julian" }"#),
            Err(PeriodError::Config(_))
        ));
        assert!(matches!(
            PeriodConfig::from_json_file("/nonexistent/period.json"),
            Err(PeriodError::Config(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("period-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "cache": { "max_capacity": 5 } }"#).unwrap();
        let config = PeriodConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.cache.max_capacity, 5);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_calendar_kind() {
        assert_eq!(CalendarKind::Iso8601.calendar().name(), "iso8601");
        assert_eq!(CalendarKind::Persian.calendar().name(), "persian");
    }

    #[test]
    fn test_cache_build() {
        let disabled = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert_eq!(disabled.build().entry_count(), 0);
        assert_eq!(CacheConfig::default().build().entry_count(), 0);
    }
}
