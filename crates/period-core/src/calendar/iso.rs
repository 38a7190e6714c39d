//! ISO-8601 (proleptic Gregorian) calendar backed by chrono.

use chrono::{Datelike, NaiveDate};

use super::Calendar;
use crate::date_unit::DateTimeUnit;
use crate::error::{PeriodError, Result};

const NAME: &str = "iso8601";

/// The ISO-8601 calendar, the default system calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso8601Calendar;

impl Iso8601Calendar {
    /// Create the ISO-8601 calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Calendar for Iso8601Calendar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_iso8601(&self) -> bool {
        true
    }

    fn to_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit> {
        Ok(DateTimeUnit::iso(unit.year(), unit.month(), unit.day()))
    }

    fn from_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit> {
        self.to_iso(unit)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        let invalid = || PeriodError::InvalidDate {
            calendar: NAME,
            year,
            month,
            day: 1,
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        // at most 31
        Ok(next.signed_duration_since(first).num_days() as u32)
    }

    fn days_in_year(&self, year: i32) -> Result<u32> {
        let leap = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or(PeriodError::DateOutOfRange(format!("year {year}")))?
            .leap_year();
        Ok(if leap { 366 } else { 365 })
    }

    fn weeks_in_year(&self, year: i32) -> Result<u32> {
        // Dec 28 always falls in the last ISO week of its year
        NaiveDate::from_ymd_opt(year, 12, 28)
            .map(|date| date.iso_week().week())
            .ok_or(PeriodError::DateOutOfRange(format!("year {year}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_days_in_month() {
        let calendar = Iso8601Calendar::new();
        assert_eq!(calendar.days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(calendar.days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(calendar.days_in_month(2023, 12).unwrap(), 31);
        assert_eq!(calendar.days_in_month(2023, 4).unwrap(), 30);
        assert!(calendar.days_in_month(2023, 13).is_err());
    }

    #[test]
    fn test_days_in_year() {
        let calendar = Iso8601Calendar::new();
        assert_eq!(calendar.days_in_year(1900).unwrap(), 365);
        assert_eq!(calendar.days_in_year(2000).unwrap(), 366);
        assert_eq!(calendar.days_in_year(2023).unwrap(), 365);
    }

    #[test]
    fn test_conversions_are_identity() {
        let calendar = Iso8601Calendar::new();
        let unit = DateTimeUnit::iso(2023, 7, 15);
        assert_eq!(calendar.to_iso(unit).unwrap(), unit);
        assert_eq!(calendar.from_iso(unit).unwrap(), unit);
    }

    #[test]
    fn test_weeks() {
        let calendar = Iso8601Calendar::new();
        assert_eq!(calendar.weeks_in_year(2020).unwrap(), 53);
        assert_eq!(calendar.weeks_in_year(2021).unwrap(), 52);
        assert_eq!(calendar.week(DateTimeUnit::iso(2021, 1, 3)).unwrap(), 53);
        assert_eq!(calendar.week(DateTimeUnit::iso(2023, 1, 15)).unwrap(), 2);
    }

    #[test]
    fn test_weekday() {
        let calendar = Iso8601Calendar::new();
        let sunday = DateTimeUnit::iso(2023, 1, 15);
        assert_eq!(calendar.weekday(sunday).unwrap(), 7);
        assert_eq!(calendar.iso_weekday(sunday).unwrap(), Weekday::Sun);
    }

    #[test]
    fn test_validity() {
        let calendar = Iso8601Calendar::new();
        assert!(calendar.is_valid(DateTimeUnit::iso(2024, 2, 29)));
        assert!(!calendar.is_valid(DateTimeUnit::iso(2023, 2, 29)));
        assert!(!calendar.is_valid(DateTimeUnit::iso(2023, 0, 1)));
    }
}
