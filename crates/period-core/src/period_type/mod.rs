//! Period types and their operations.
//!
//! [`PeriodType`] is a closed set of variants. Each variant maps to a rule in
//! the variant table (see `rule.rs`), and every operation below dispatches on
//! that rule, so adding a month based type only takes a new table row.

use chrono::{Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::Calendar;
use crate::date_unit::DateTimeUnit;
use crate::error::{PeriodError, Result};
use crate::period::Period;

mod months;
mod rule;
mod weekly;


use rule::Rule;

/// A calendar-aligned period type.
///
/// Variants are declared in frequency order, shortest first, which is also
/// the order of [`PeriodType::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodType {
    /// Single days.
    Daily,
    /// Weeks starting on Monday.
    Weekly,
    /// Weeks starting on Wednesday.
    WeeklyWednesday,
    /// Weeks starting on Thursday.
    WeeklyThursday,
    /// Weeks starting on Saturday.
    WeeklySaturday,
    /// Weeks starting on Sunday.
    WeeklySunday,
    /// Pairs of Monday weeks.
    BiWeekly,
    /// Calendar months.
    Monthly,
    /// Pairs of months starting in January.
    BiMonthly,
    /// Quarters starting in January.
    Quarterly,
    /// Quarters starting in November.
    QuarterlyNov,
    /// Half years starting in January.
    SixMonthly,
    /// Half years starting in April.
    SixMonthlyApril,
    /// Half years starting in November.
    SixMonthlyNov,
    /// Calendar years.
    Yearly,
    /// Financial years starting in April.
    FinancialApril,
    /// Financial years starting in July.
    FinancialJuly,
    /// Financial years starting in September.
    FinancialSep,
    /// Financial years starting in October.
    FinancialOct,
    /// Financial years starting in November.
    FinancialNov,
    /// Two-year periods starting on even years.
    TwoYearly,
}

impl PeriodType {
    /// Returns the registered name, e.g. `SixMonthlyApril`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::WeeklyWednesday => "WeeklyWednesday",
            Self::WeeklyThursday => "WeeklyThursday",
            Self::WeeklySaturday => "WeeklySaturday",
            Self::WeeklySunday => "WeeklySunday",
            Self::BiWeekly => "BiWeekly",
            Self::Monthly => "Monthly",
            Self::BiMonthly => "BiMonthly",
            Self::Quarterly => "Quarterly",
            Self::QuarterlyNov => "QuarterlyNov",
            Self::SixMonthly => "SixMonthly",
            Self::SixMonthlyApril => "SixMonthlyApril",
            Self::SixMonthlyNov => "SixMonthlyNov",
            Self::Yearly => "Yearly",
            Self::FinancialApril => "FinancialApril",
            Self::FinancialJuly => "FinancialJuly",
            Self::FinancialSep => "FinancialSep",
            Self::FinancialOct => "FinancialOct",
            Self::FinancialNov => "FinancialNov",
            Self::TwoYearly => "TwoYearly",
        }
    }

    /// Returns the ISO format pattern, or `None` for types without one.
    #[must_use]
    pub const fn iso_format(self) -> Option<&'static str> {
        Some(match self {
            Self::Daily => "yyyyMMdd",
            Self::Weekly => "yyyyWn",
            Self::WeeklyWednesday => "yyyyWedWn",
            Self::WeeklyThursday => "yyyyThuWn",
            Self::WeeklySaturday => "yyyySatWn",
            Self::WeeklySunday => "yyyySunWn",
            Self::BiWeekly => "yyyyBiWn",
            Self::Monthly => "yyyyMM",
            Self::BiMonthly => "yyyyMMB",
            Self::Quarterly => "yyyyQn",
            Self::QuarterlyNov => "yyyyNovQn",
            Self::SixMonthly => "yyyySn",
            Self::SixMonthlyApril => "yyyyAprilSn",
            Self::SixMonthlyNov => "yyyyNovSn",
            Self::Yearly => "yyyy",
            Self::FinancialApril => "yyyyApril",
            Self::FinancialJuly => "yyyyJuly",
            Self::FinancialSep => "yyyySep",
            Self::FinancialOct => "yyyyOct",
            Self::FinancialNov => "yyyyNov",
            Self::TwoYearly => return None,
        })
    }

    /// Returns true if a single period of this type can cross January 1st.
    #[must_use]
    pub const fn spans_multiple_calendar_years(self) -> bool {
        match self.rule() {
            Rule::Months(span) => span.anchor != 1,
            Rule::TwoYearly => true,
            Rule::Daily | Rule::Weekly { .. } | Rule::BiWeekly => false,
        }
    }

    fn not_supported(self, operation: &'static str) -> PeriodError {
        PeriodError::NotSupported {
            period_type: self.name(),
            operation,
        }
    }

    /// Local first and last day of the period containing a local unit.
    fn bounds(
        self,
        unit: DateTimeUnit,
        calendar: &dyn Calendar,
    ) -> Result<(DateTimeUnit, DateTimeUnit)> {
        match self.rule() {
            Rule::Daily => Ok((unit, unit)),
            Rule::Weekly { start, .. } => weekly::week_bounds(unit, start, calendar),
            Rule::BiWeekly => weekly::biweek_bounds(unit, calendar),
            Rule::Months(span) => {
                let start = span.start_of(unit, calendar)?;
                Ok((start, span.end_of(start, calendar)?))
            }
            Rule::TwoYearly => {
                let year = unit.year() - unit.year().rem_euclid(2);
                let start = DateTimeUnit::new(year, 1, 1, unit.is_iso8601());
                let last = calendar.plus_months(start, 2 * i64::from(calendar.months_in_year()) - 1)?;
                let end = last.with_day(calendar.days_in_month(last.year(), last.month())?);
                Ok((start, end))
            }
        }
    }

    /// Local first and last day of the type-year containing a local unit.
    fn type_year_bounds(
        self,
        unit: DateTimeUnit,
        calendar: &dyn Calendar,
    ) -> Result<(DateTimeUnit, DateTimeUnit)> {
        match self.rule() {
            Rule::Daily => {
                let months = calendar.months_in_year();
                let first = DateTimeUnit::new(unit.year(), 1, 1, unit.is_iso8601());
                let last = DateTimeUnit::new(
                    unit.year(),
                    months,
                    calendar.days_in_month(unit.year(), months)?,
                    unit.is_iso8601(),
                );
                Ok((first, last))
            }
            Rule::Weekly { start, .. } => {
                let (first, _) = weekly::week_bounds(unit, start, calendar)?;
                let (year, _) = weekly::week_of_year(first, start, calendar)?;
                weekly::week_year_bounds(year, start, calendar)
            }
            Rule::BiWeekly => {
                let (first, _) = weekly::week_bounds(unit, chrono::Weekday::Mon, calendar)?;
                let (year, _) = weekly::week_of_year(first, chrono::Weekday::Mon, calendar)?;
                weekly::week_year_bounds(year, chrono::Weekday::Mon, calendar)
            }
            Rule::Months(span) => {
                let year_span = span.type_year(calendar.months_in_year());
                let start = year_span.start_of(unit, calendar)?;
                Ok((start, year_span.end_of(start, calendar)?))
            }
            Rule::TwoYearly => self.bounds(unit, calendar),
        }
    }

    fn checked_local(unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<DateTimeUnit> {
        let local = calendar.to_local(unit)?;
        if !calendar.is_valid(local) {
            return Err(PeriodError::InvalidDate {
                calendar: calendar.name(),
                year: local.year(),
                month: local.month(),
                day: local.day(),
            });
        }
        Ok(local)
    }

    fn build(
        self,
        start: DateTimeUnit,
        end: DateTimeUnit,
        calendar: &dyn Calendar,
    ) -> Result<Period> {
        let iso_date = match self.rule() {
            Rule::TwoYearly => None,
            _ => Some(self.iso_date(start, calendar)?),
        };
        Period::new(
            self,
            calendar.to_iso(start)?.to_naive_date()?,
            calendar.to_iso(end)?.to_naive_date()?,
            iso_date,
        )
    }

    /// Creates the period of this type containing the date.
    ///
    /// The unit may be ISO or local to `calendar`. The result is canonical:
    /// any date inside a period yields that same period.
    pub fn create_period(self, unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<Period> {
        let unit = Self::checked_local(unit, calendar)?;
        let (start, end) = self.bounds(unit, calendar)?;
        self.build(start, end, calendar)
    }

    /// Creates the period of this type containing an ISO date.
    pub fn create_period_for_date(self, date: NaiveDate, calendar: &dyn Calendar) -> Result<Period> {
        self.create_period(DateTimeUnit::from(date), calendar)
    }

    /// Returns the ISO string of the period of this type starting at `unit`.
    ///
    /// Month based types require `unit` to lie in a month a period can start in
    /// and fail with [`PeriodError::InvalidMonth`] otherwise.
    pub fn iso_date(self, unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<String> {
        let unit = calendar.to_local(unit)?;
        match self.rule() {
            Rule::Daily => Ok(format!(
                "{:04}{:02}{:02}",
                unit.year(),
                unit.month(),
                unit.day()
            )),
            Rule::Weekly { start, marker } => weekly::week_iso(unit, start, marker, calendar),
            Rule::BiWeekly => weekly::biweek_iso(unit, calendar),
            Rule::Months(span) => span.iso_date(unit, self, calendar),
            Rule::TwoYearly => Err(self.not_supported("ISO encoding")),
        }
    }

    /// Parses an ISO string of this type.
    ///
    /// Returns `Ok(None)` when the string does not have this type's format and
    /// an error when it has the format but names no real period, e.g. `2023Q5`.
    pub fn parse_iso(self, iso: &str, calendar: &dyn Calendar) -> Result<Option<Period>> {
        let Some(captures) = self.pattern().and_then(|pattern| pattern.captures(iso)) else {
            return Ok(None);
        };
        let malformed = |reason: &str| PeriodError::MalformedIsoPeriod {
            iso: iso.to_string(),
            reason: reason.to_string(),
        };
        let number = |group: usize| -> Result<Option<u32>> {
            captures
                .get(group)
                .map(|m| m.as_str().parse::<u32>().map_err(|e| malformed(&e.to_string())))
                .transpose()
        };
        let year = captures
            .get(1)
            .ok_or_else(|| malformed("missing year"))?
            .as_str()
            .parse::<i32>()
            .map_err(|e| malformed(&e.to_string()))?;
        let first = number(2)?.unwrap_or(1);

        let (start, end) = match self.rule() {
            Rule::Daily => {
                let day = number(3)?.ok_or_else(|| malformed("missing day"))?;
                let unit = DateTimeUnit::new(year, first, day, calendar.is_iso8601());
                if !calendar.is_valid(unit) {
                    return Err(malformed("no such day"));
                }
                (unit, unit)
            }
            Rule::Weekly { start, .. } => {
                let first_day = weekly::week_from_iso(year, first, start, calendar)?
                    .ok_or_else(|| malformed("no such week"))?;
                weekly::week_bounds(first_day, start, calendar)?
            }
            Rule::BiWeekly => weekly::biweek_from_iso(year, first, calendar)?
                .ok_or_else(|| malformed("no such bi-week"))?,
            Rule::Months(span) => {
                let start = span
                    .start_from_iso(year, first, calendar)?
                    .ok_or_else(|| malformed("period index out of range"))?;
                (start, span.end_of(start, calendar)?)
            }
            Rule::TwoYearly => return Ok(None),
        };

        self.build(start, end, calendar).map(Some)
    }

    /// Returns the period of this type immediately following `period`.
    pub fn next_period(self, period: &Period, calendar: &dyn Calendar) -> Result<Period> {
        let after = period
            .end_date()
            .succ_opt()
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("after {}", period.end_date())))?;
        self.create_period_for_date(after, calendar)
    }

    /// Returns the period of this type immediately preceding `period`.
    pub fn previous_period(self, period: &Period, calendar: &dyn Calendar) -> Result<Period> {
        let before = period
            .start_date()
            .pred_opt()
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("before {}", period.start_date())))?;
        self.create_period_for_date(before, calendar)
    }

    /// Moves `offset` periods forward (positive) or backward (negative).
    ///
    /// A period of another type is first replaced by the period of this type
    /// containing its start date.
    pub fn shifted_period(
        self,
        period: &Period,
        offset: i64,
        calendar: &dyn Calendar,
    ) -> Result<Period> {
        let mut current = if period.period_type() == self {
            period.clone()
        } else {
            self.create_period_for_date(period.start_date(), calendar)?
        };
        for _ in 0..offset.unsigned_abs() {
            current = if offset > 0 {
                self.next_period(&current, calendar)?
            } else {
                self.previous_period(&current, calendar)?
            };
        }
        Ok(current)
    }

    /// Returns the period `offset` periods after the current one (before it when negative).
    pub fn future_period(self, offset: i64, calendar: &dyn Calendar) -> Result<Period> {
        let current = self.create_period(calendar.today()?, calendar)?;
        self.shifted_period(&current, offset, calendar)
    }

    /// Generates every period of the type-year containing the date, in order.
    ///
    /// The type-year is the calendar year for January anchored types, the
    /// financial year for shifted types and the ISO week-year for weekly ones.
    pub fn generate_periods(self, unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<Vec<Period>> {
        let unit = Self::checked_local(unit, calendar)?;
        let (first, last) = self.type_year_bounds(unit, calendar)?;
        let mut periods = Vec::new();
        let mut cursor = first;
        loop {
            let (start, end) = self.bounds(cursor, calendar)?;
            periods.push(self.build(start, end, calendar)?);
            if end >= last {
                break;
            }
            cursor = calendar.plus_days(end, 1)?;
        }
        Ok(periods)
    }

    /// Generates the trailing window of periods ending with the one containing the date.
    ///
    /// The window holds [`rolling_window_length`](Self::rolling_window_length)
    /// periods in chronological order.
    pub fn generate_rolling_periods(
        self,
        unit: DateTimeUnit,
        calendar: &dyn Calendar,
    ) -> Result<Vec<Period>> {
        let length = self
            .rolling_window_length()
            .ok_or_else(|| self.not_supported("rolling periods"))?;
        let mut current = self.create_period(unit, calendar)?;
        let mut periods = Vec::with_capacity(length);
        periods.push(current.clone());
        for _ in 1..length {
            current = self.previous_period(&current, calendar)?;
            periods.push(current.clone());
        }
        periods.reverse();
        Ok(periods)
    }

    /// Generates every period of this type intersecting `[start, end]`.
    pub fn generate_periods_between(
        self,
        start: DateTimeUnit,
        end: DateTimeUnit,
        calendar: &dyn Calendar,
    ) -> Result<Vec<Period>> {
        let first = calendar.to_iso(start)?.to_naive_date()?;
        let last = calendar.to_iso(end)?.to_naive_date()?;
        let mut periods = Vec::new();
        if first > last {
            return Ok(periods);
        }
        let mut current = self.create_period(start, calendar)?;
        while current.start_date() <= last {
            let next = self.next_period(&current, calendar)?;
            periods.push(current);
            current = next;
        }
        Ok(periods)
    }

    /// Moves an ISO date back by `rewind` natural steps of this type.
    ///
    /// Defaults to today and a single step.
    pub fn rewinded_date(self, date: Option<NaiveDate>, rewind: Option<u32>) -> Result<NaiveDate> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let steps = rewind.unwrap_or(1);
        let rewound = match self.rule() {
            Rule::Daily => date.checked_sub_days(Days::new(u64::from(steps))),
            Rule::Weekly { .. } => date.checked_sub_days(Days::new(7 * u64::from(steps))),
            Rule::BiWeekly => date.checked_sub_days(Days::new(14 * u64::from(steps))),
            Rule::Months(span) => date.checked_sub_months(Months::new(span.span.saturating_mul(steps))),
            Rule::TwoYearly => date.checked_sub_months(Months::new(24u32.saturating_mul(steps))),
        };
        rewound.ok_or_else(|| PeriodError::DateOutOfRange(format!("{date} rewound {steps} times")))
    }

    /// Moves a date by `offset` natural steps of this type in `calendar`.
    pub fn date_with_offset(
        self,
        unit: DateTimeUnit,
        offset: i64,
        calendar: &dyn Calendar,
    ) -> Result<DateTimeUnit> {
        let scaled = |factor: i64| {
            offset
                .checked_mul(factor)
                .ok_or_else(|| PeriodError::DateOutOfRange(format!("{self} offset {offset}")))
        };
        match self.rule() {
            Rule::Daily => calendar.plus_days(unit, offset),
            Rule::Weekly { .. } => calendar.plus_weeks(unit, offset),
            Rule::BiWeekly => calendar.plus_weeks(unit, scaled(2)?),
            Rule::Months(span) => calendar.plus_months(unit, scaled(i64::from(span.span))?),
            Rule::TwoYearly => calendar.plus_years(unit, scaled(2)?),
        }
    }

    /// Returns the period of this type containing the start of `period` moved back `years` years.
    ///
    /// Years are counted in `calendar`; a leap day falls back to the last day
    /// of February.
    pub fn previous_years_period(
        self,
        period: &Period,
        years: u32,
        calendar: &dyn Calendar,
    ) -> Result<Period> {
        let start = calendar.from_iso(DateTimeUnit::from(period.start_date()))?;
        let moved = calendar.minus_years(start, i64::from(years))?;
        self.create_period(moved, calendar)
    }

    /// Creates a period of this type over an explicit ISO interval.
    ///
    /// The bounds are kept as given; the ISO string is that of the period of
    /// this type containing `start`. Fails when `start` is after `end`.
    pub fn create_period_for_interval(
        self,
        start: NaiveDate,
        end: NaiveDate,
        calendar: &dyn Calendar,
    ) -> Result<Period> {
        let iso_date = self
            .create_period_for_date(start, calendar)?
            .iso_date()
            .map(str::to_string);
        Period::new(self, start, end, iso_date)
    }

    /// Returns the period's own type and, for every strictly longer type, the
    /// period of that type containing the period's start date.
    ///
    /// Types sharing the period's frequency with another anchor are skipped.
    pub fn covering_periods(period: &Period, calendar: &dyn Calendar) -> Result<Vec<Period>> {
        Self::ALL
            .iter()
            .filter(|period_type| {
                period_type.frequency_order() > period.frequency_order()
                    || **period_type == period.period_type()
            })
            .map(|period_type| period_type.create_period_for_date(period.start_date(), calendar))
            .collect()
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PeriodType {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s).ok_or_else(|| PeriodError::UnknownPeriodType(s.to_string()))
    }
}
