//! Calendar-neutral date value.
//!
//! [`DateTimeUnit`] is the currency every [`Calendar`](crate::calendar::Calendar) speaks.
//! It is `Copy`, so arithmetic always yields a fresh value and callers never
//! observe each other's changes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PeriodError, Result};

/// A year/month/day triple expressed in some calendar.
///
/// The `iso8601` flag records whether the fields are Gregorian (ISO-8601) or
/// belong to a local calendar. Ordering compares year, month and day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTimeUnit {
    year: i32,
    month: u32,
    day: u32,
    iso8601: bool,
}

impl DateTimeUnit {
    /// Creates a unit from raw fields without validating them against a calendar.
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32, iso8601: bool) -> Self {
        Self {
            year,
            month,
            day,
            iso8601,
        }
    }

    /// Creates an ISO-8601 unit.
    #[must_use]
    pub const fn iso(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, true)
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the 1-based month.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the 1-based day of month.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns true if the fields are Gregorian.
    #[must_use]
    pub const fn is_iso8601(&self) -> bool {
        self.iso8601
    }

    /// Returns a copy with a different year.
    #[must_use]
    pub const fn with_year(self, year: i32) -> Self {
        Self { year, ..self }
    }

    /// Returns a copy with a different month.
    #[must_use]
    pub const fn with_month(self, month: u32) -> Self {
        Self { month, ..self }
    }

    /// Returns a copy with a different day.
    #[must_use]
    pub const fn with_day(self, day: u32) -> Self {
        Self { day, ..self }
    }

    /// Returns a copy pointing at the first day of the month.
    #[must_use]
    pub const fn first_of_month(self) -> Self {
        self.with_day(1)
    }

    /// Converts an ISO unit to a [`NaiveDate`].
    ///
    /// Local units must go through [`Calendar::to_iso`](crate::calendar::Calendar::to_iso) first.
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        if !self.iso8601 {
            return Err(PeriodError::InvalidDate {
                calendar: "iso8601",
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(PeriodError::InvalidDate {
            calendar: "iso8601",
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }
}

impl From<NaiveDate> for DateTimeUnit {
    fn from(date: NaiveDate) -> Self {
        Self::iso(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateTimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let unit = DateTimeUnit::from(date);
        assert!(unit.is_iso8601());
        assert_eq!(unit.to_naive_date().unwrap(), date);
    }

    #[test]
    fn test_local_unit_refuses_naive_conversion() {
        let unit = DateTimeUnit::new(1402, 1, 1, false);
        assert!(unit.to_naive_date().is_err());
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let unit = DateTimeUnit::iso(2023, 2, 29);
        assert!(matches!(
            unit.to_naive_date(),
            Err(PeriodError::InvalidDate { day: 29, .. })
        ));
    }

    #[test]
    fn test_copy_semantics() {
        let original = DateTimeUnit::iso(2023, 5, 17);
        let moved = original.with_day(1);
        assert_eq!(original.day(), 17);
        assert_eq!(moved.day(), 1);
        assert_eq!(moved, original.first_of_month());
    }

    #[test]
    fn test_ordering_and_display() {
        let a = DateTimeUnit::iso(2023, 1, 31);
        let b = DateTimeUnit::iso(2023, 2, 1);
        assert!(a < b);
        assert_eq!(a.to_string(), "2023-01-31");
    }
}
