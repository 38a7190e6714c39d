//! Period context bundling the calendar, cache and settings.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, instrument};

use period_cache::InMemoryCache;
use period_core::{
    Calendar, DateTimeUnit, Iso8601Calendar, Period, PeriodCache, PeriodKey, PeriodType, Result,
};

use crate::config::PeriodConfig;
use crate::relative::FinancialYearStart;

/// Calendar, cache and settings shared by period operations.
///
/// A context is cheap to clone and safe to share between threads. Periods
/// created through [`create_period`](Self::create_period) are memoized in
/// the cache.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use period::{PeriodContext, PeriodType};
///
/// let context = PeriodContext::new();
/// let date = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
/// let period = context.create_period(PeriodType::BiMonthly, date).unwrap();
/// assert_eq!(period.iso_date(), Some("202301B"));
/// ```
#[derive(Clone)]
pub struct PeriodContext {
    calendar: Arc<dyn Calendar>,
    cache: Arc<dyn PeriodCache>,
    config: PeriodConfig,
}

impl fmt::Debug for PeriodContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodContext")
            .field("calendar", &self.calendar.name())
            .field("cached_periods", &self.cache.entry_count())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for PeriodContext {
    fn default() -> Self {
        Self {
            calendar: Arc::new(Iso8601Calendar::new()),
            cache: Arc::new(InMemoryCache::new()),
            config: PeriodConfig::default(),
        }
    }
}

impl PeriodContext {
    /// Create a context with the ISO-8601 calendar and a default in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a configuration.
    #[must_use]
    pub fn from_config(config: PeriodConfig) -> Self {
        debug!(
            calendar = ?config.calendar,
            cache_enabled = config.cache.enabled,
            financial_year_start = ?config.financial_year_start,
            "Creating period context"
        );
        Self {
            calendar: config.calendar.calendar(),
            cache: config.cache.build(),
            config,
        }
    }

    /// Set the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        debug!(calendar = calendar.name(), "Setting calendar");
        self.calendar = calendar;
        self
    }

    /// Set the period cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn PeriodCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set the financial year used by the financial relative periods.
    #[must_use]
    pub fn with_financial_year_start(mut self, start: FinancialYearStart) -> Self {
        self.config.financial_year_start = start;
        self
    }

    /// Set whether rolling relative periods include the current period.
    #[must_use]
    pub fn with_rolling_includes_current(mut self, include: bool) -> Self {
        self.config.rolling_includes_current = include;
        self
    }

    /// Returns the calendar.
    #[must_use]
    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// Returns the period cache.
    #[must_use]
    pub fn cache(&self) -> &dyn PeriodCache {
        self.cache.as_ref()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PeriodConfig {
        &self.config
    }

    /// Returns today's ISO date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Creates the period of the given type containing an ISO date.
    ///
    /// Results are cached per calendar, type and date.
    pub fn create_period(&self, period_type: PeriodType, date: NaiveDate) -> Result<Period> {
        let key = PeriodKey::new(self.calendar.name(), period_type, date);
        self.cache.get_or_create(key, &mut || {
            period_type.create_period_for_date(date, self.calendar.as_ref())
        })
    }

    /// Creates the period of the given type containing today.
    pub fn create_period_now(&self, period_type: PeriodType) -> Result<Period> {
        self.create_period(period_type, self.today())
    }

    /// Returns the period immediately following `period`.
    pub fn next_period(&self, period: &Period) -> Result<Period> {
        period.period_type().next_period(period, self.calendar())
    }

    /// Returns the period immediately preceding `period`.
    pub fn previous_period(&self, period: &Period) -> Result<Period> {
        period.period_type().previous_period(period, self.calendar())
    }

    /// Moves `offset` periods forward (positive) or backward (negative).
    pub fn shifted_period(&self, period: &Period, offset: i64) -> Result<Period> {
        period
            .period_type()
            .shifted_period(period, offset, self.calendar())
    }

    /// Generates every period of the type-year containing the date.
    #[instrument(skip(self), level = "debug")]
    pub fn generate_periods(&self, period_type: PeriodType, date: NaiveDate) -> Result<Vec<Period>> {
        period_type.generate_periods(DateTimeUnit::from(date), self.calendar())
    }

    /// Generates the trailing window of periods ending with the one containing the date.
    #[instrument(skip(self), level = "debug")]
    pub fn generate_rolling_periods(
        &self,
        period_type: PeriodType,
        date: NaiveDate,
    ) -> Result<Vec<Period>> {
        period_type.generate_rolling_periods(DateTimeUnit::from(date), self.calendar())
    }

    /// Generates every period of the given type intersecting `[start, end]`.
    #[instrument(skip(self), level = "debug")]
    pub fn generate_periods_between(
        &self,
        period_type: PeriodType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Period>> {
        period_type.generate_periods_between(
            DateTimeUnit::from(start),
            DateTimeUnit::from(end),
            self.calendar(),
        )
    }

    /// Parses an ISO period string of any type.
    ///
    /// `Ok(None)` means no period type recognises the string.
    pub fn parse_period(&self, iso: &str) -> Result<Option<Period>> {
        PeriodType::period_from_iso_string(iso, self.calendar())
    }

    /// Parses ISO period strings, skipping those that name no real period.
    pub fn periods_from_iso_strings<'a, I>(&self, isos: I) -> Vec<Period>
    where
        I: IntoIterator<Item = &'a str>,
    {
        PeriodType::periods_from_iso_strings(isos, self.calendar())
    }
}
