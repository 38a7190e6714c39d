//! Month based partitioning shared by monthly, quarterly, six-monthly and yearly types.
//!
//! Months are numbered on a single axis (`year * months_in_year + month - 1`)
//! so that rewinding past January or running past December is plain integer
//! arithmetic. The type-year of a span starts at its anchor month; the ISO
//! index of a period is its position inside that type-year.

use super::PeriodType;
use super::rule::{IsoLayout, MonthSpan, YearLabel};
use crate::calendar::Calendar;
use crate::date_unit::DateTimeUnit;
use crate::error::{PeriodError, Result};

fn month_index(unit: DateTimeUnit, per_year: i64) -> i64 {
    i64::from(unit.year()) * per_year + i64::from(unit.month()) - 1
}

fn unit_at(index: i64, per_year: i64, iso8601: bool) -> Result<DateTimeUnit> {
    let year = i32::try_from(index.div_euclid(per_year))
        .map_err(|_| PeriodError::DateOutOfRange(format!("month index {index}")))?;
    // rem_euclid keeps the month in 0..per_year
    let month = index.rem_euclid(per_year) as u32 + 1;
    Ok(DateTimeUnit::new(year, month, 1, iso8601))
}

impl MonthSpan {
    /// Periods per type-year.
    pub(crate) const fn periods_per_year(&self, months_in_year: u32) -> u32 {
        months_in_year / self.span
    }

    /// The same partition stretched to a whole type-year.
    pub(crate) const fn type_year(&self, months_in_year: u32) -> Self {
        Self {
            span: months_in_year,
            ..*self
        }
    }

    /// First day of the period containing `unit`.
    pub(crate) fn start_of(&self, unit: DateTimeUnit, calendar: &dyn Calendar) -> Result<DateTimeUnit> {
        let per_year = i64::from(calendar.months_in_year());
        let index = month_index(unit, per_year);
        let offset = (index - i64::from(self.anchor) + 1).rem_euclid(i64::from(self.span));
        unit_at(index - offset, per_year, unit.is_iso8601())
    }

    /// Last day of the period starting at `start`.
    pub(crate) fn end_of(&self, start: DateTimeUnit, calendar: &dyn Calendar) -> Result<DateTimeUnit> {
        let last = calendar.plus_months(start.first_of_month(), i64::from(self.span) - 1)?;
        Ok(last.with_day(calendar.days_in_month(last.year(), last.month())?))
    }

    /// Months a period of this partition can start in, ascending.
    pub(crate) fn allowed_months(&self, months_in_year: u32) -> Vec<u32> {
        let mut months: Vec<u32> = (0..self.periods_per_year(months_in_year))
            .map(|i| (self.anchor - 1 + i * self.span) % months_in_year + 1)
            .collect();
        months.sort_unstable();
        months
    }

    /// ISO string of the period starting in the month of `unit`.
    pub(crate) fn iso_date(
        &self,
        unit: DateTimeUnit,
        period_type: PeriodType,
        calendar: &dyn Calendar,
    ) -> Result<String> {
        let months_in_year = calendar.months_in_year();
        let per_year = i64::from(months_in_year);
        let position = month_index(unit, per_year) - i64::from(self.anchor) + 1;
        if position.rem_euclid(i64::from(self.span)) != 0 {
            return Err(PeriodError::InvalidMonth {
                period_type: period_type.name(),
                month: unit.month(),
                allowed: self.allowed_months(months_in_year),
            });
        }

        let shift = match self.label {
            YearLabel::Start => 0,
            YearLabel::End => 1,
        };
        let year = position.div_euclid(per_year) + shift;
        let index = position.rem_euclid(per_year) / i64::from(self.span) + 1;

        Ok(match self.layout {
            IsoLayout::Month => format!("{year:04}{index:02}"),
            IsoLayout::BiMonth => format!("{year:04}{index:02}B"),
            IsoLayout::Indexed(prefix) => format!("{year:04}{prefix}{index}"),
            IsoLayout::Year => format!("{year:04}"),
            IsoLayout::Suffix(suffix) => format!("{year:04}{suffix}"),
        })
    }

    /// First day of the period labelled `year` / `index`, or `None` when the index is out of range.
    pub(crate) fn start_from_iso(
        &self,
        year: i32,
        index: u32,
        calendar: &dyn Calendar,
    ) -> Result<Option<DateTimeUnit>> {
        let months_in_year = calendar.months_in_year();
        if index == 0 || index > self.periods_per_year(months_in_year) {
            return Ok(None);
        }
        let per_year = i64::from(months_in_year);
        let shift = match self.label {
            YearLabel::Start => 0,
            YearLabel::End => 1,
        };
        let position = (i64::from(year) - shift) * per_year + i64::from((index - 1) * self.span);
        let start = unit_at(
            position + i64::from(self.anchor) - 1,
            per_year,
            calendar.is_iso8601(),
        )?;
        Ok(Some(start))
    }
}
