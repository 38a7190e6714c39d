//! Persian (Solar Hijri) calendar.
//!
//! Table driven: the supported range starts at 1353-01-01 (1974-03-21) and
//! ends with 1419. The first six months have 31 days, the next five 30 and
//! Esfand has 29 days, or 30 in the listed leap years.

use chrono::NaiveDate;

use super::Calendar;
use crate::date_unit::DateTimeUnit;
use crate::error::{PeriodError, Result};

const NAME: &str = "persian";

const MIN_YEAR: i32 = 1353;
const MAX_YEAR: i32 = 1419;

const LEAP_YEARS: [i32; 16] = [
    1354, 1358, 1362, 1366, 1370, 1375, 1379, 1383, 1387, 1391, 1395, 1399, 1403, 1408, 1412, 1416,
];

/// ISO date of 1353-01-01.
const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1974, 3, 21) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// The Persian (Solar Hijri) calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersianCalendar;

impl PersianCalendar {
    /// Create the Persian calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns true if Esfand has 30 days in the given year.
    #[must_use]
    pub fn is_leap_year(year: i32) -> bool {
        LEAP_YEARS.contains(&year)
    }

    fn check_year(year: i32) -> Result<()> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(PeriodError::CalendarRange {
                calendar: NAME,
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
        Ok(())
    }
}

impl Calendar for PersianCalendar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn to_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit> {
        if unit.is_iso8601() {
            return Ok(unit);
        }
        if !self.is_valid(unit) {
            Self::check_year(unit.year())?;
            return Err(PeriodError::InvalidDate {
                calendar: NAME,
                year: unit.year(),
                month: unit.month(),
                day: unit.day(),
            });
        }

        let mut days = u64::from(unit.day() - 1);
        for year in MIN_YEAR..unit.year() {
            days += u64::from(self.days_in_year(year)?);
        }
        for month in 1..unit.month() {
            days += u64::from(self.days_in_month(unit.year(), month)?);
        }

        EPOCH
            .checked_add_days(chrono::Days::new(days))
            .map(DateTimeUnit::from)
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("persian {unit}")))
    }

    fn from_iso(&self, unit: DateTimeUnit) -> Result<DateTimeUnit> {
        if !unit.is_iso8601() {
            return Ok(unit);
        }
        let date = unit.to_naive_date()?;
        let mut days = date.signed_duration_since(EPOCH).num_days();
        if days < 0 {
            return Err(PeriodError::CalendarRange {
                calendar: NAME,
                year: MIN_YEAR - 1,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }

        let mut year = MIN_YEAR;
        loop {
            let length = i64::from(self.days_in_year(year)?);
            if days < length {
                break;
            }
            days -= length;
            year += 1;
        }

        let mut month = 1;
        loop {
            let length = i64::from(self.days_in_month(year, month)?);
            if days < length {
                break;
            }
            days -= length;
            month += 1;
        }

        // days < 31 here
        Ok(DateTimeUnit::new(year, month, days as u32 + 1, false))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        Self::check_year(year)?;
        match month {
            1..=6 => Ok(31),
            7..=11 => Ok(30),
            12 if Self::is_leap_year(year) => Ok(30),
            12 => Ok(29),
            _ => Err(PeriodError::InvalidDate {
                calendar: NAME,
                year,
                month,
                day: 1,
            }),
        }
    }

    fn weekday(&self, unit: DateTimeUnit) -> Result<u32> {
        // the week starts on Saturday
        let weekday = self.iso_weekday(unit)?;
        Ok((weekday.num_days_from_monday() + 2) % 7 + 1)
    }
}
