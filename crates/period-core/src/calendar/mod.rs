//! Calendar systems.
//!
//! A [`Calendar`] converts between its local dates and ISO-8601 dates and knows
//! the facts period arithmetic depends on: month lengths, week length and the
//! number of months in a year. All period logic is written against this trait,
//! so the same rules produce Gregorian months or Persian months depending on
//! the calendar passed in.

use chrono::{Datelike, Days, Local, Weekday};
use std::fmt;

use crate::date_unit::DateTimeUnit;
use crate::error::{PeriodError, Result};

mod iso;
mod persian;

pub use iso::Iso8601Calendar;
pub use persian::PersianCalendar;

/// A calendar system.
///
/// Implementors provide the conversions and month lengths; everything else has
/// a default built on top of them. Units handed to a calendar may be either ISO
/// or local; results of arithmetic are always local to the calendar.
pub trait Calendar: Send + Sync + fmt::Debug {
    /// Returns the calendar identifier, e.g. `iso8601`.
    fn name(&self) -> &'static str;

    /// Returns true if local dates of this calendar are ISO-8601 dates.
    fn is_iso8601(&self) -> bool {
        false
    }

    /// Converts a local unit to ISO-8601. ISO units are returned unchanged.
    fn to_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit>;

    /// Converts an ISO-8601 unit to a local one. Local units are returned unchanged.
    fn from_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit>;

    /// Returns the number of days in a month of a local year.
    fn days_in_month(&self, year: i32, month: u32) -> Result<u32>;

    /// Returns the number of months in a year.
    fn months_in_year(&self) -> u32 {
        12
    }

    /// Returns the number of days in a week.
    fn days_in_week(&self) -> u32 {
        7
    }

    /// Returns the number of days in a local year.
    fn days_in_year(&self, year: i32) -> Result<u32> {
        (1..=self.months_in_year()).try_fold(0, |total, month| {
            Ok(total + self.days_in_month(year, month)?)
        })
    }

    /// Returns today's date in this calendar.
    fn today(&self) -> Result<DateTimeUnit> {
        self.from_iso(DateTimeUnit::from(Local::now().date_naive()))
    }

    /// Brings a unit into this calendar, converting ISO units when needed.
    fn to_local(&self, unit: DateTimeUnit) -> Result<DateTimeUnit> {
        if unit.is_iso8601() {
            self.from_iso(unit)
        } else {
            Ok(unit)
        }
    }

    /// Returns true if the unit names an existing local day.
    fn is_valid(&self, unit: DateTimeUnit) -> bool {
        unit.month() >= 1
            && unit.month() <= self.months_in_year()
            && unit.day() >= 1
            && self
                .days_in_month(unit.year(), unit.month())
                .is_ok_and(|days| unit.day() <= days)
    }

    /// Adds days, crossing month and year boundaries as needed.
    fn plus_days(&self, unit: DateTimeUnit, days: i64) -> Result<DateTimeUnit> {
        let date = self.to_iso(unit)?.to_naive_date()?;
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        }
        .ok_or_else(|| PeriodError::DateOutOfRange(format!("{date} {days:+} days")))?;
        self.from_iso(DateTimeUnit::from(shifted))
    }

    /// Subtracts days.
    fn minus_days(&self, unit: DateTimeUnit, days: i64) -> Result<DateTimeUnit> {
        self.plus_days(unit, days.saturating_neg())
    }

    /// Adds whole weeks.
    fn plus_weeks(&self, unit: DateTimeUnit, weeks: i64) -> Result<DateTimeUnit> {
        let days = weeks
            .checked_mul(i64::from(self.days_in_week()))
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("{unit} {weeks:+} weeks")))?;
        self.plus_days(unit, days)
    }

    /// Subtracts whole weeks.
    fn minus_weeks(&self, unit: DateTimeUnit, weeks: i64) -> Result<DateTimeUnit> {
        self.plus_weeks(unit, weeks.saturating_neg())
    }

    /// Adds months, clamping the day to the length of the target month.
    fn plus_months(&self, unit: DateTimeUnit, months: i64) -> Result<DateTimeUnit> {
        let unit = self.to_local(unit)?;
        let per_year = i64::from(self.months_in_year());
        let index = (i64::from(unit.year()) * per_year + i64::from(unit.month()) - 1)
            .checked_add(months)
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("{unit} {months:+} months")))?;
        let year = i32::try_from(index.div_euclid(per_year))
            .map_err(|_| PeriodError::DateOutOfRange(format!("{unit} {months:+} months")))?;
        // rem_euclid keeps the month in 0..per_year
        let month = index.rem_euclid(per_year) as u32 + 1;
        let days = self.days_in_month(year, month)?;
        Ok(DateTimeUnit::new(
            year,
            month,
            unit.day().min(days),
            unit.is_iso8601(),
        ))
    }

    /// Subtracts months.
    fn minus_months(&self, unit: DateTimeUnit, months: i64) -> Result<DateTimeUnit> {
        self.plus_months(unit, months.saturating_neg())
    }

    /// Adds years, clamping the day to the length of the target month.
    fn plus_years(&self, unit: DateTimeUnit, years: i64) -> Result<DateTimeUnit> {
        let months = years
            .checked_mul(i64::from(self.months_in_year()))
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("{unit} {years:+} years")))?;
        self.plus_months(unit, months)
    }

    /// Subtracts years.
    fn minus_years(&self, unit: DateTimeUnit, years: i64) -> Result<DateTimeUnit> {
        self.plus_years(unit, years.saturating_neg())
    }

    /// Returns the 1-based position of the day within this calendar's week.
    fn weekday(&self, unit: DateTimeUnit) -> Result<u32> {
        Ok(self.iso_weekday(unit)?.number_from_monday())
    }

    /// Returns the ISO weekday of the unit.
    fn iso_weekday(&self, unit: DateTimeUnit) -> Result<Weekday> {
        Ok(self.to_iso(unit)?.to_naive_date()?.weekday())
    }

    /// Returns the ISO-8601 week number of the unit.
    fn week(&self, unit: DateTimeUnit) -> Result<u32> {
        Ok(self.to_iso(unit)?.to_naive_date()?.iso_week().week())
    }

    /// Returns the number of Monday-based weeks in a local week-year.
    fn weeks_in_year(&self, year: i32) -> Result<u32> {
        weeks_in_week_year(self, year, Weekday::Mon)
    }

    /// Returns the signed number of days from `from` to `to`.
    fn days_between(&self, from: DateTimeUnit, to: DateTimeUnit) -> Result<i64> {
        let from = self.to_iso(from)?.to_naive_date()?;
        let to = self.to_iso(to)?.to_naive_date()?;
        Ok(to.signed_duration_since(from).num_days())
    }
}

/// Rewinds a unit to the most recent `start` weekday, itself included.
pub(crate) fn start_of_week<C: Calendar + ?Sized>(
    calendar: &C,
    unit: DateTimeUnit,
    start: Weekday,
) -> Result<DateTimeUnit> {
    let weekday = calendar.iso_weekday(unit)?;
    let back = (7 + weekday.num_days_from_monday() - start.num_days_from_monday()) % 7;
    calendar.minus_days(unit, i64::from(back))
}

/// First day of week 1 of a local week-year: the week holding the 4th of the first month.
pub(crate) fn week_one_start<C: Calendar + ?Sized>(
    calendar: &C,
    year: i32,
    start: Weekday,
) -> Result<DateTimeUnit> {
    let fourth = DateTimeUnit::new(year, 1, 4, calendar.is_iso8601());
    start_of_week(calendar, fourth, start)
}

pub(crate) fn weeks_in_week_year<C: Calendar + ?Sized>(
    calendar: &C,
    year: i32,
    start: Weekday,
) -> Result<u32> {
    let first = week_one_start(calendar, year, start)?;
    let next = week_one_start(calendar, year + 1, start)?;
    let days = calendar.days_between(first, next)?;
    u32::try_from(days / i64::from(calendar.days_in_week()))
        .map_err(|_| PeriodError::DateOutOfRange(format!("week-year {year}")))
}
