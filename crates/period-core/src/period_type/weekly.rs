//! Week and bi-week partitioning.
//!
//! Week 1 of a week-year is the week holding the 4th day of the first month,
//! so a week belongs to the year that contains most of its days. Bi-weeks pair
//! Monday weeks 1+2, 3+4 and so on; in a 53-week year the last bi-week holds
//! week 53 alone.

use chrono::Weekday;

use crate::calendar::{Calendar, start_of_week, week_one_start, weeks_in_week_year};
use crate::date_unit::DateTimeUnit;
use crate::error::Result;

/// Week-year and 1-based week number of the week starting at `week_start`.
pub(crate) fn week_of_year(
    week_start: DateTimeUnit,
    start: Weekday,
    calendar: &dyn Calendar,
) -> Result<(i32, u32)> {
    let mut year = week_start.year();
    // only a week starting in the last month can be week 1 of the next year
    let in_last_month = week_start.month() == calendar.months_in_year();
    if in_last_month
        && calendar.days_between(week_one_start(calendar, year + 1, start)?, week_start)? >= 0
    {
        year += 1;
    } else if calendar.days_between(week_one_start(calendar, year, start)?, week_start)? < 0 {
        // an early January week can be the last week of the previous year
        year -= 1;
    }

    let first = week_one_start(calendar, year, start)?;
    let days = calendar.days_between(first, week_start)?;
    let week = days / i64::from(calendar.days_in_week()) + 1;
    // week is within 1..=53
    Ok((year, week as u32))
}

/// First and last day of the week containing `unit`.
pub(crate) fn week_bounds(
    unit: DateTimeUnit,
    start: Weekday,
    calendar: &dyn Calendar,
) -> Result<(DateTimeUnit, DateTimeUnit)> {
    let first = start_of_week(calendar, unit, start)?;
    let last = calendar.plus_days(first, i64::from(calendar.days_in_week()) - 1)?;
    Ok((first, last))
}

/// First and last day of week-year `year`.
pub(crate) fn week_year_bounds(
    year: i32,
    start: Weekday,
    calendar: &dyn Calendar,
) -> Result<(DateTimeUnit, DateTimeUnit)> {
    let first = week_one_start(calendar, year, start)?;
    let last = calendar.minus_days(week_one_start(calendar, year + 1, start)?, 1)?;
    Ok((first, last))
}

pub(crate) fn week_iso(
    unit: DateTimeUnit,
    start: Weekday,
    marker: &str,
    calendar: &dyn Calendar,
) -> Result<String> {
    let first = start_of_week(calendar, unit, start)?;
    let (year, week) = week_of_year(first, start, calendar)?;
    Ok(format!("{year:04}{marker}{week}"))
}

/// First day of week `week` of `year`, or `None` when the year has no such week.
pub(crate) fn week_from_iso(
    year: i32,
    week: u32,
    start: Weekday,
    calendar: &dyn Calendar,
) -> Result<Option<DateTimeUnit>> {
    if week == 0 || week > weeks_in_week_year(calendar, year, start)? {
        return Ok(None);
    }
    let first = week_one_start(calendar, year, start)?;
    Ok(Some(calendar.plus_weeks(first, i64::from(week) - 1)?))
}

fn biweeks_in_year(year: i32, calendar: &dyn Calendar) -> Result<u32> {
    Ok(weeks_in_week_year(calendar, year, Weekday::Mon)?.div_ceil(2))
}

/// Bounds of bi-week `index` of week-year `year`; the caller checks the index.
fn biweek(
    year: i32,
    index: u32,
    calendar: &dyn Calendar,
) -> Result<(DateTimeUnit, DateTimeUnit)> {
    let first = week_one_start(calendar, year, Weekday::Mon)?;
    let start = calendar.plus_weeks(first, 2 * (i64::from(index) - 1))?;
    let second = calendar.plus_weeks(start, 1)?;
    let weeks = if week_of_year(second, Weekday::Mon, calendar)?.0 == year { 2 } else { 1 };
    let end = calendar.plus_days(start, weeks * i64::from(calendar.days_in_week()) - 1)?;
    Ok((start, end))
}

/// Week-year and bi-week index of the bi-week containing `unit`.
fn biweek_of_year(unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<(i32, u32)> {
    let week_start = start_of_week(calendar, unit, Weekday::Mon)?;
    let (year, week) = week_of_year(week_start, Weekday::Mon, calendar)?;
    Ok((year, week.div_ceil(2)))
}

pub(crate) fn biweek_bounds(
    unit: DateTimeUnit,
    calendar: &dyn Calendar,
) -> Result<(DateTimeUnit, DateTimeUnit)> {
    let (year, index) = biweek_of_year(unit, calendar)?;
    biweek(year, index, calendar)
}

pub(crate) fn biweek_iso(unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<String> {
    let (year, index) = biweek_of_year(unit, calendar)?;
    Ok(format!("{year:04}BiW{index}"))
}

/// Bounds of bi-week `index` of `year`, or `None` when the year has no such bi-week.
pub(crate) fn biweek_from_iso(
    year: i32,
    index: u32,
    calendar: &dyn Calendar,
) -> Result<Option<(DateTimeUnit, DateTimeUnit)>> {
    if index == 0 || index > biweeks_in_year(year, calendar)? {
        return Ok(None);
    }
    biweek(year, index, calendar).map(Some)
}
